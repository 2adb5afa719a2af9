//! # fnpack Resources Command
//!
//! File: cli/src/commands/resources.rs
//!
//! ## Overview
//!
//! Implements `fnpack resources`: lists every source file bundled by any GCP
//! function type, with its archive mode. With `--archive <path>` the same files
//! are zipped into one package, used when shipping fnpack together with the
//! function sources.
//!
//! ```bash
//! fnpack resources
//! fnpack resources --archive dist/functions.zip
//! ```
//!
use super::{load_builder, ConfigArgs};
use crate::common::archive::zip;
use crate::common::fs::io;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for `fnpack resources`.
#[derive(Parser, Debug)]
pub struct ResourcesArgs {
    /// Also zip every listed resource into this file.
    #[arg(long)]
    pub archive: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Handles `fnpack resources`.
pub async fn handle_resources(args: ResourcesArgs) -> Result<()> {
    let builder = load_builder(&args.config)?;
    let resources = builder.list_archive_resources();
    if resources.is_empty() {
        warn!("No function resources are registered.");
    }
    for resource in &resources {
        println!("{}", resource);
    }

    if let Some(archive_path) = args.archive {
        let root = builder.package_root().to_path_buf();
        let bundled = resources.clone();
        let raw = tokio::task::spawn_blocking(move || zip::make_zip(&root, &bundled)).await??;
        io::write_bytes_to_file(&archive_path, &raw)?;
        info!(
            "Packaged {} resources into {} ({} bytes)",
            resources.len(),
            archive_path.display(),
            raw.len()
        );
    }
    Ok(())
}
