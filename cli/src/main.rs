//! # fnpack Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the `fnpack` CLI, which prepares Google
//! Cloud Functions deployments: a zip archive of a function's sources and the
//! JSON request body registering it. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - `commands`: one module per subcommand (`build`, `render`, `resources`)
//! - `provider`: function registry and the GCP template builder
//! - `common`: archive and filesystem utilities
//! - `core`: configuration and errors
//!
//! ## Examples
//!
//! ```bash
//! # Preview the request body of a function
//! fnpack render es-storage
//!
//! # Write es-storage.zip and es-storage.json to ./dist with debug logging
//! fnpack -vv build es-storage --output-dir dist
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;
mod provider;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "fnpack",
    about = "Build Google Cloud Functions archives and deployment requests",
    long_about = "Resolve configured functions, bundle their sources into zip archives,\n\
                  and render the request bodies used to register them with Cloud Functions.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Write a function's zip archive and request body.
    #[command(alias = "b")]
    Build(commands::build::BuildArgs),
    /// Print a function's request body without building the archive.
    #[command(alias = "r")]
    Render(commands::render::RenderArgs),
    /// List (and optionally bundle) the source files of every function type.
    Resources(commands::resources::ResourcesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Build(args) => commands::build::handle_build(args).await,
        Commands::Render(args) => commands::render::handle_render(args).await,
        Commands::Resources(args) => commands::resources::handle_resources(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_global_verbosity() {
        let cli = Cli::try_parse_from(["fnpack", "-vv", "render", "es-storage"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_build_alias() {
        let cli = Cli::try_parse_from(["fnpack", "b", "es-storage"]).unwrap();
        assert!(matches!(cli.command, Commands::Build(_)));
    }
}
