//! # GCP Function Types (`provider::gcp::function`)
//!
//! File: cli/src/provider/gcp/function.rs
//!
//! ## Overview
//!
//! Typed configuration for the Cloud Functions fnpack knows how to package.
//! Each supported trigger is one `FunctionKind` variant; the kind decides the
//! Go entry point, the source package name, and which event types are
//! accepted. `FunctionKind::configure` turns a raw `[[functions]]` entry into
//! a validated `FunctionConfig` with the kind's defaults applied.
//!
use crate::core::config::{parse_duration, FunctionEntry};
use crate::core::error::{FnpackError, Result};
use crate::provider::gcp::Installer;
use crate::provider::Function;
use anyhow::anyhow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Memory sizes (MB) Cloud Functions accepts.
pub const ALLOWED_MEMORY_SIZES: [u64; 5] = [128, 256, 512, 1024, 2048];

/// Supported function kinds, one per trigger source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    PubSub,
    Storage,
}

impl FunctionKind {
    /// Every kind, in registration order.
    pub const ALL: [FunctionKind; 2] = [FunctionKind::PubSub, FunctionKind::Storage];

    /// Maps a configured `type` value to its kind.
    ///
    /// # Errors
    ///
    /// Returns `FnpackError::UnknownFunctionType` for anything other than
    /// `pubsub` or `storage`.
    pub fn from_type_name(type_name: &str) -> Result<Self> {
        match type_name {
            "pubsub" => Ok(FunctionKind::PubSub),
            "storage" => Ok(FunctionKind::Storage),
            other => Err(anyhow!(FnpackError::UnknownFunctionType {
                type_name: other.to_string(),
            })),
        }
    }

    /// Name of the source package under `pkg/`.
    pub fn type_name(self) -> &'static str {
        match self {
            FunctionKind::PubSub => "pubsub",
            FunctionKind::Storage => "storage",
        }
    }

    /// Exported Go function the runtime invokes.
    pub fn entry_point(self) -> &'static str {
        match self {
            FunctionKind::PubSub => "RunPubSub",
            FunctionKind::Storage => "RunCloudStorage",
        }
    }

    /// Event type used when the entry does not set `trigger.event_type`.
    pub fn default_event_type(self) -> &'static str {
        self.accepted_event_types()[0]
    }

    pub fn accepted_event_types(self) -> &'static [&'static str] {
        match self {
            FunctionKind::PubSub => &["google.pubsub.topic.publish"],
            FunctionKind::Storage => &[
                "google.storage.object.finalize",
                "google.storage.object.delete",
                "google.storage.object.archive",
                "google.storage.object.metadataUpdate",
            ],
        }
    }

    /// Builds a validated `FunctionConfig` from a configuration entry.
    ///
    /// Applies the kind's entry point and default event type, then checks the
    /// trigger, memory size and timeout.
    ///
    /// # Errors
    ///
    /// Returns `FnpackError::Config` describing the first invalid field.
    pub fn configure(self, entry: &FunctionEntry) -> Result<FunctionConfig> {
        let event_type = entry
            .trigger
            .event_type
            .clone()
            .unwrap_or_else(|| self.default_event_type().to_string());
        if !self.accepted_event_types().contains(&event_type.as_str()) {
            return Err(config_error(format!(
                "event type '{}' is not supported by {} functions (expected one of: {})",
                event_type,
                self,
                self.accepted_event_types().join(", ")
            )));
        }
        if entry.trigger.resource.trim().is_empty() {
            return Err(config_error("trigger.resource must be set".to_string()));
        }
        if entry.memory_size != 0 && !ALLOWED_MEMORY_SIZES.contains(&entry.memory_size) {
            return Err(config_error(format!(
                "memory_size {} is not one of {:?}",
                entry.memory_size, ALLOWED_MEMORY_SIZES
            )));
        }
        let timeout = match entry.timeout.as_deref() {
            Some(raw) => parse_duration(raw)?,
            None => Duration::ZERO,
        };

        Ok(FunctionConfig {
            description: entry.description.clone(),
            entry_point: self.entry_point().to_string(),
            trigger: Trigger {
                event_type,
                resource: entry.trigger.resource.clone(),
                service: entry.trigger.service.clone(),
            },
            timeout,
            memory_size: entry.memory_size,
            service_account_email: entry.service_account_email.clone(),
            labels: entry.labels.clone(),
            max_instances: entry.max_instances,
            vpc_connector: entry.vpc_connector.clone(),
        })
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

fn config_error(message: String) -> anyhow::Error {
    anyhow!(FnpackError::Config(message))
}

/// Event source of a function, serialized as the API's `eventTrigger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub event_type: String,
    pub resource: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
}

/// Configuration of one Cloud Function. Zero values mean "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    pub description: String,
    pub entry_point: String,
    pub trigger: Trigger,
    pub timeout: Duration,
    /// Memory in MB.
    pub memory_size: u64,
    pub service_account_email: String,
    pub labels: BTreeMap<String, String>,
    pub max_instances: u32,
    pub vpc_connector: String,
}

/// A configured function backed by one of the GCP source packages.
#[derive(Debug, Clone)]
pub struct GcpFunction {
    name: String,
    kind: FunctionKind,
    config: FunctionConfig,
}

impl GcpFunction {
    /// Wraps an already validated configuration.
    pub fn new(name: impl Into<String>, kind: FunctionKind, config: FunctionConfig) -> Self {
        Self {
            name: name.into(),
            kind,
            config,
        }
    }

    pub fn from_entry(entry: &FunctionEntry) -> Result<Self> {
        let kind = FunctionKind::from_type_name(&entry.type_name)?;
        Ok(Self::new(entry.name.clone(), kind, kind.configure(entry)?))
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }
}

impl Function for GcpFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn installer(&self) -> Option<&dyn Installer> {
        Some(self)
    }
}

impl Installer for GcpFunction {
    fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    fn config(&self) -> &FunctionConfig {
        &self.config
    }
}
