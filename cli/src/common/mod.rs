//! # fnpack Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the providers and the commands, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`archive`**: resource descriptors and zip assembly.
//! - **`fs`**: filesystem helpers that attach paths to errors.
//!

/// Archive assembly (resource descriptors, zip).
pub mod archive;
/// Filesystem I/O helpers.
pub mod fs;
