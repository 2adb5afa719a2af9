//! # fnpack Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the archive assembler and the commands.
//!
//! - **`io`**: reading source files as bytes (`read_file_bytes`), ensuring
//!   output directories exist (`ensure_dir_exists`), and writing build outputs
//!   (`write_bytes_to_file`).
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let bytes = io::read_file_bytes(Path::new("pkg/storage/go.mod"))?;
//! io::write_bytes_to_file(Path::new("dist/go.mod"), &bytes)?;
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_bytes`, `write_bytes_to_file`).
pub mod io;
