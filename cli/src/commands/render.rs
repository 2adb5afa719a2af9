//! # fnpack Render Command
//!
//! File: cli/src/commands/render.rs
//!
//! ## Overview
//!
//! Implements `fnpack render <name>`, a dry run that prints the request body a
//! deployment would POST, without reading any function sources.
//!
use super::{load_builder, ConfigArgs};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `fnpack render`.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Name of the configured function.
    pub name: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Handles `fnpack render`.
pub async fn handle_render(args: RenderArgs) -> Result<()> {
    info!("Rendering request body for '{}'", args.name);
    let builder = load_builder(&args.config)?;
    println!("{}", builder.raw_template(&args.name)?);
    Ok(())
}
