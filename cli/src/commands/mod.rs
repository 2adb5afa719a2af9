//! # fnpack Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The commands exposed by the `fnpack` binary:
//!
//! - `build`: write a function's zip archive and request body to disk
//! - `render`: print a function's request body without building (dry run)
//! - `resources`: list, and optionally bundle, every file any function ships
//!
//! Each command module defines its Clap arguments and an async `handle_*`
//! function. Configuration is loaded per invocation through `load_builder`.
//!
use crate::core::config;
use crate::core::error::Result;
use crate::provider::gcp::TemplateBuilder;
use crate::provider::FunctionRegistry;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handler and arguments for `fnpack build`.
pub mod build;
/// Handler and arguments for `fnpack render`.
pub mod render;
/// Handler and arguments for `fnpack resources`.
pub mod resources;

/// Configuration file selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the fnpack configuration file. Defaults to the nearest
    /// `.fnpack.toml`, then the user configuration directory.
    #[arg(long, env = "FNPACK_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// Loads the configuration and assembles a `TemplateBuilder` from it.
pub fn load_builder(args: &ConfigArgs) -> Result<TemplateBuilder> {
    let cfg = config::load_config(args.path()).context("Failed to load fnpack configuration")?;
    let registry = FunctionRegistry::from_config(&cfg)?;
    TemplateBuilder::new(cfg.gcp, cfg.package_root, Arc::new(registry))
}
