//! # fnpack Zip Archive Operations (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Builds the zip archive uploaded as a function's source. Cloud Functions
//! only accepts zip archives, so this is the format used for every bundle.
//!
//! ## Architecture
//!
//! The module uses the `zip` crate, writing into an in-memory buffer.
//!
//! - Entries are written in the order the resources are given; duplicate paths
//!   are not detected.
//! - Each entry keeps the resource's unix mode and uses Deflate compression.
//! - Modification times are pinned to the zip epoch (1980-01-01 00:00:00) so
//!   the same inputs produce byte-identical archives.
//! - A file that cannot be read aborts the whole archive; no partial bytes are
//!   returned.
//!
//! ```rust
//! let bytes = zip::make_zip(package_root, &resources)?;
//! debug!("zip size: {} bytes", bytes.len());
//! ```
//!
use super::Resource;
use crate::common::fs::io;
use crate::core::error::{FnpackError, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// # Create Zip Archive (`make_zip`)
///
/// Reads every resource from `root.join(resource.path())` and returns the
/// bytes of a zip archive containing them.
///
/// ## Errors
///
/// Returns `FnpackError::Io` if a file cannot be read or the archive cannot
/// be written.
pub fn make_zip(root: &Path, resources: &[Resource]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for resource in resources {
        let source = root.join(resource.path());
        let content = io::read_file_bytes(&source)?;
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(resource.mode());

        let name = resource.archive_name();
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| zip_error(&source, e))?;
        writer.write_all(&content).map_err(|e| FnpackError::Io {
            path: source.clone(),
            source: e,
        })?;
        debug!("Added '{}' ({} bytes) to archive", name, content.len());
    }

    let cursor = writer.finish().map_err(|e| zip_error(root, e))?;
    Ok(cursor.into_inner())
}

fn zip_error(path: &Path, err: zip::result::ZipError) -> FnpackError {
    FnpackError::Io {
        path: path.to_path_buf(),
        source: err.into(),
    }
}
