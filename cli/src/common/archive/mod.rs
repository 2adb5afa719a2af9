//! # fnpack Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module groups archive-related utilities. Its main job is producing the
//! zip archive Cloud Functions deploys from: a fixed set of source files, each
//! stored under its relative path with an explicit permission mode.
//!
//! ## Architecture
//!
//! - **`Resource`**: describes one file to bundle (relative path + unix mode).
//! - **`zip`**: assembles resources into an in-memory zip with pinned
//!   timestamps, so identical inputs always yield identical bytes.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, Resource};
//!
//! let resources = vec![
//!     Resource::new("pkg/storage/storage.go", 0o755),
//!     Resource::new("pkg/storage/go.mod", 0o655),
//! ];
//! let bytes = archive::zip::make_zip(Path::new("."), &resources)?;
//! ```
//!
use std::fmt;
use std::path::{Path, PathBuf};

pub mod zip;

/// One file to include in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    path: PathBuf,
    mode: u32,
}

impl Resource {
    /// Creates a resource. `path` is relative to the archive root and is also
    /// the entry name inside the archive.
    pub fn new(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unix permission bits, e.g. `0o755`.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Entry name inside the archive, always `/`-separated.
    pub fn archive_name(&self) -> String {
        self.path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}  {}", self.mode, self.archive_name())
    }
}
