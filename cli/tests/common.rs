//! # fnpack CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: locating the compiled binary and
//! laying out a temporary project (configuration file plus `pkg/` sources).
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Configuration used by every fixture project.
pub const CONFIG: &str = r#"
package_root = "."

[gcp]
project_id = "my-project"
location_id = "europe-west2"
storage_name = "my-artifacts"

[[functions]]
name = "es-storage"
type = "storage"
description = "sync events"
timeout = "30s"
memory_size = 256

[functions.trigger]
resource = "projects/_/buckets/my-bucket"

[[functions]]
name = "es-pubsub"
type = "pubsub"
description = "topic events"
service_account_email = "fn@my-project.iam.gserviceaccount.com"
max_instances = 2
labels = { team = "obs" }

[functions.trigger]
resource = "projects/my-project/topics/logs"
"#;

/// Returns a `Command` for the `fnpack` binary under test, with any
/// inherited `FNPACK_CONFIG` removed.
pub fn fnpack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fnpack").expect("Failed to find fnpack binary for testing");
    cmd.env_remove("FNPACK_CONFIG");
    cmd
}

/// A temporary project containing `fnpack.toml` and sources for both function types.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp project");
        fs::write(dir.path().join("fnpack.toml"), CONFIG).unwrap();
        for type_name in ["pubsub", "storage"] {
            let pkg = dir.path().join("pkg").join(type_name);
            fs::create_dir_all(&pkg).unwrap();
            fs::write(
                pkg.join(format!("{}.go", type_name)),
                format!("package {}\n", type_name),
            )
            .unwrap();
            fs::write(pkg.join("go.mod"), format!("module example.com/{}\n", type_name)).unwrap();
            fs::write(pkg.join("go.sum"), "").unwrap();
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("fnpack.toml")
    }
}
