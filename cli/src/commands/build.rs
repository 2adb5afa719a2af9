//! # fnpack Build Command
//!
//! File: cli/src/commands/build.rs
//!
//! ## Overview
//!
//! Implements `fnpack build <name>`: resolves the function, zips its sources,
//! renders its request body, and writes both next to each other:
//!
//! - `<output-dir>/<name>.zip`: the archive to upload to `gs://<storage_name>/<name>`
//! - `<output-dir>/<name>.json`: the body to POST to the Cloud Functions API
//!
//! Archive assembly does blocking file reads, so it runs on Tokio's blocking
//! pool.
//!
//! ```bash
//! fnpack build es-storage --output-dir dist
//! ```
//!
use super::{load_builder, ConfigArgs};
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `fnpack build`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Name of the configured function to build.
    pub name: String,

    /// Directory receiving `<name>.zip` and `<name>.json`.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Handles `fnpack build`.
pub async fn handle_build(args: BuildArgs) -> Result<()> {
    info!("Building function '{}'", args.name);
    let builder = load_builder(&args.config)?;

    let name = args.name.clone();
    let data = tokio::task::spawn_blocking(move || builder.build(&name))
        .await
        .context("Build task failed to complete")??;

    let zip_path = args.output_dir.join(format!("{}.zip", args.name));
    let body_path = args.output_dir.join(format!("{}.json", args.name));
    io::write_bytes_to_file(&zip_path, &data.raw)?;
    io::write_bytes_to_file(&body_path, data.request_body.to_pretty_string().as_bytes())?;

    let upload_url = data
        .request_body
        .get("sourceArchiveUrl")
        .and_then(|url| url.as_str())
        .unwrap_or_default();
    println!(
        "Built '{}': {} ({} bytes), {} ({} fields). Upload the archive to {}",
        args.name,
        zip_path.display(),
        data.raw.len(),
        body_path.display(),
        data.request_body.len(),
        upload_url
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_build_defaults() {
        let args = BuildArgs::try_parse_from(["build", "es-storage"]).unwrap();
        assert_eq!(args.name, "es-storage");
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_parses_build_output_and_config() {
        let args = BuildArgs::try_parse_from([
            "build",
            "es-storage",
            "--output-dir",
            "dist",
            "--config",
            "fnpack.toml",
        ])
        .unwrap();
        assert_eq!(args.output_dir, PathBuf::from("dist"));
        assert_eq!(args.config.config, Some(PathBuf::from("fnpack.toml")));
    }

    #[test]
    fn test_requires_name() {
        assert!(BuildArgs::try_parse_from(["build"]).is_err());
    }
}
