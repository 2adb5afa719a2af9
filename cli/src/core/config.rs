//! # fnpack Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the fnpack configuration: the Google Cloud provider
//! settings (project, location, artifact bucket), the root directory holding the
//! function sources, and the list of functions that can be packaged.
//!
//! ## Architecture
//!
//! A single TOML file is used. It is located in this order:
//! 1. An explicit path (`--config` or `FNPACK_CONFIG`)
//! 2. `.fnpack.toml` in the current directory or its ancestors, stopping at the
//!    first directory containing `.git`
//! 3. `config.toml` in the user configuration directory
//!
//! After parsing, `package_root` is tilde-expanded and, when relative, resolved
//! against the directory of the file it came from. Validation then rejects
//! incomplete provider settings and malformed function entries so that nothing
//! downstream has to re-check them.
//!
//! ## Examples
//!
//! ```toml
//! package_root = "."
//!
//! [gcp]
//! project_id = "my-project"
//! location_id = "europe-west2"
//! storage_name = "my-artifacts"
//!
//! [[functions]]
//! name = "es-storage"
//! type = "storage"
//! description = "sync events"
//! timeout = "30s"
//! memory_size = 256
//!
//! [functions.trigger]
//! resource = "projects/_/buckets/my-bucket"
//! ```
//!
use crate::core::error::{FnpackError, Result};
use crate::provider::gcp::function::FunctionKind;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from a TOML file.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing `pkg/<type>/...` function sources (can use ~).
    #[serde(default = "default_package_root")]
    pub package_root: String,
    /// Google Cloud provider settings.
    #[serde(default)]
    pub gcp: GcpConfig,
    /// Functions that can be packaged and deployed.
    #[serde(default)]
    pub functions: Vec<FunctionEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_root: default_package_root(),
            gcp: GcpConfig::default(),
            functions: Vec::new(),
        }
    }
}

/// Google Cloud settings shared by every function.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GcpConfig {
    pub project_id: String,
    pub location_id: String,
    /// Cloud Storage bucket holding uploaded function archives.
    pub storage_name: String,
}

/// One `[[functions]]` entry as written in the configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FunctionEntry {
    pub name: String,
    /// Function type, which selects the source package (`pubsub` or `storage`).
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: String,
    /// Go-style duration such as `30s` or `1m30s`.
    #[serde(default)]
    pub timeout: Option<String>,
    /// Memory in MB.
    #[serde(default)]
    pub memory_size: u64,
    #[serde(default)]
    pub service_account_email: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub max_instances: u32,
    #[serde(default)]
    pub vpc_connector: String,
    pub trigger: TriggerEntry,
}

/// The `trigger` table of a function entry.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TriggerEntry {
    pub resource: String,
    /// Defaults to the function type's event when omitted.
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub service: String,
}

fn default_package_root() -> String {
    ".".to_string()
}

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".fnpack.toml";

/// Loads, expands and validates the configuration.
///
/// `explicit` takes precedence over discovery and must point at an existing file.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!(FnpackError::Config(format!(
                    "Configuration file '{}' does not exist.",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => locate_config_file()?,
    };
    info!("Loading configuration from: {}", config_path.display());

    let mut config = load_config_from_path(&config_path)?;
    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    expand_config_paths(&mut config, &base_dir);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

/// Finds the configuration file when none was given explicitly.
///
/// Searches for `.fnpack.toml` from the current directory upwards, then falls
/// back to `config.toml` in the user configuration directory
/// (e.g. `~/.config/fnpack/config.toml` on Linux).
///
/// # Errors
///
/// Returns `FnpackError::Config` when neither location has a file, or an
/// error if the current directory cannot be determined.
fn locate_config_file() -> Result<PathBuf> {
    if let Some(project_config) = find_project_config_path()? {
        return Ok(project_config);
    }
    if let Some(proj_dirs) = ProjectDirs::from("com", "fnpack", "fnpack") {
        let user_config = proj_dirs.config_dir().join("config.toml");
        if user_config.is_file() {
            return Ok(user_config);
        }
        debug!("User configuration not found at {}", user_config.display());
    }
    Err(anyhow!(FnpackError::Config(format!(
        "No configuration found. Create {} or pass --config.",
        PROJECT_CONFIG_FILENAME
    ))))
}

/// Searches upwards from the current working directory for `.fnpack.toml`.
fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_config_upwards(&current_dir))
}

/// Walks from `start` towards the filesystem root looking for
/// `.fnpack.toml`. The walk stops at the first directory containing `.git`,
/// so settings never leak in from outside the repository.
fn find_config_upwards(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and parses a TOML configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// `Config` (unknown keys included).
fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Expands `~` in `package_root` and anchors relative roots at `base_dir`,
/// the directory holding the configuration file.
///
/// # Arguments
///
/// * `config` - Configuration whose paths are rewritten in place.
/// * `base_dir` - Directory relative paths are resolved against.
fn expand_config_paths(config: &mut Config, base_dir: &Path) {
    let expanded = PathBuf::from(shellexpand::tilde(&config.package_root).into_owned());
    let resolved = if expanded.is_relative() {
        base_dir.join(expanded)
    } else {
        expanded
    };
    config.package_root = resolved.to_string_lossy().into_owned();
    debug!("Resolved package root: {}", config.package_root);
}

/// Checks the loaded configuration before any function is registered.
///
/// # Errors
///
/// Returns `FnpackError::Config` if a `[gcp]` setting is blank, a function
/// name is blank or repeated, or an entry fails `FunctionKind::configure`.
/// Unknown `type` values yield `FnpackError::UnknownFunctionType`.
fn validate_config(config: &Config) -> Result<()> {
    let gcp = &config.gcp;
    for (field, value) in [
        ("project_id", &gcp.project_id),
        ("location_id", &gcp.location_id),
        ("storage_name", &gcp.storage_name),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(FnpackError::Config(format!(
                "gcp.{} must be set.",
                field
            ))));
        }
    }

    let mut seen = HashSet::new();
    for entry in &config.functions {
        if entry.name.trim().is_empty() {
            return Err(anyhow!(FnpackError::Config(
                "Function entries must have a non-empty name.".to_string()
            )));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(anyhow!(FnpackError::Config(format!(
                "Function '{}' is declared more than once.",
                entry.name
            ))));
        }
        FunctionKind::from_type_name(&entry.type_name)?
            .configure(entry)
            .with_context(|| format!("Invalid configuration for function '{}'", entry.name))?;
    }
    info!("Configuration validation successful.");
    Ok(())
}

/// Parses a Go-style duration: one or more `<integer><unit>` pairs where the
/// unit is `h`, `m`, `s` or `ms`. A bare `0` is accepted as zero.
///
/// # Examples
///
/// `"30s"`, `"1m30s"`, `"1500ms"`.
///
/// # Errors
///
/// Returns `FnpackError::Config` for empty or malformed input and for
/// durations too large to represent.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let text = input.trim();
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        anyhow::bail!(FnpackError::Config("Empty duration.".to_string()));
    }

    let invalid = || anyhow!(FnpackError::Config(format!("Invalid duration '{}'.", input)));
    let mut total = Duration::ZERO;
    let mut rest = text;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        if digits_end == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits_end].parse().map_err(|_| invalid())?;
        rest = &rest[digits_end..];
        let unit_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_end] {
            "h" => value.checked_mul(3600).map(Duration::from_secs),
            "m" => value.checked_mul(60).map(Duration::from_secs),
            "s" => Some(Duration::from_secs(value)),
            "ms" => Some(Duration::from_millis(value)),
            _ => return Err(invalid()),
        }
        .ok_or_else(invalid)?;
        // Out-of-range values are rejected rather than saturated.
        total = total.checked_add(part).ok_or_else(invalid)?;
        rest = &rest[unit_end..];
    }
    Ok(total)
}
