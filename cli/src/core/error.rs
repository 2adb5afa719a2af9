//! # fnpack Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout fnpack. Domain failures
//! are variants of `FnpackError`; everything travels as `anyhow::Error` so call
//! sites can attach context, and callers that need to react to a specific
//! failure downcast back to `FnpackError`.
//!
//! The error types cover:
//! - Function resolution (unknown names, functions that cannot be packaged)
//! - Archive assembly (unreadable sources, zip write failures)
//! - Configuration loading and validation
//! - Registry lookups (unknown providers or function types)
//!
//! ## Examples
//!
//! ```rust
//! match builder.build("es-storage") {
//!     Ok(data) => println!("{} bytes", data.raw.len()),
//!     Err(e) if matches!(e.downcast_ref::<FnpackError>(), Some(FnpackError::FunctionNotFound { .. })) => {
//!         eprintln!("no such function");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for fnpack.
#[derive(Error, Debug)]
pub enum FnpackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Function '{name}' not found.")]
    FunctionNotFound { name: String },

    #[error("Function '{name}' has an incompatible type, expecting an installable function.")]
    IncompatibleFunction { name: String },

    #[error("Failed to archive '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown provider '{provider}'.")]
    UnknownProvider { provider: String },

    #[error("Unknown function type '{type_name}'.")]
    UnknownFunctionType { type_name: String },
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
