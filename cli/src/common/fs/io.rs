//! # fnpack Basic File I/O (`common::fs::io`)
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers over `std::fs` that attach the offending path to every error.
//! Reads used while assembling archives fail with `FnpackError::Io`, so callers
//! can tell an unreadable source apart from other failures.
//!
use crate::core::error::{FnpackError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it and any
/// missing parents if needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(FnpackError::Config(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file.
///
/// # Errors
///
/// Returns `FnpackError::Io` carrying `path` if the file cannot be opened or read.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| {
        FnpackError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Writes `content` to `path`, creating the parent directory first and
/// overwriting any existing file.
pub fn write_bytes_to_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// `ensure_dir_exists` creates nested directories.
    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    /// `ensure_dir_exists` refuses a path that is a file.
    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_then_read_bytes() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("dist/es-storage.zip");
        write_bytes_to_file(&file_path, b"PK\x05\x06")?;
        assert_eq!(read_file_bytes(&file_path)?, b"PK\x05\x06");
        Ok(())
    }

    /// A missing file surfaces as `FnpackError::Io` with the path attached.
    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nonexistent.go");
        let err = read_file_bytes(&file_path).unwrap_err();
        match err.downcast_ref::<FnpackError>() {
            Some(FnpackError::Io { path, .. }) => assert_eq!(path, &file_path),
            other => panic!("expected Io error, got {:?}", other),
        }
        Ok(())
    }
}
