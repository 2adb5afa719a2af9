//! # Cloud Functions Request Body (`provider::gcp::request`)
//!
//! File: cli/src/provider/gcp/request.rs
//!
//! ## Overview
//!
//! Renders the body of a `projects.locations.functions` create/patch call from
//! a function's configuration. Seven fields are always present (`name`,
//! `description`, `entryPoint`, `runtime`, `sourceArchiveUrl`, `eventTrigger`,
//! `environmentVariables`). The optional fields (`timeout`, `memorySize`,
//! `serviceAccountEmail`, `labels`, `maxInstances`, `vpcConnector`) are only
//! written when their value is non-zero or non-empty, so the API applies its
//! own defaults otherwise.
//!
//! ## Example output
//!
//! ```json
//! {
//!   "description": "sync events",
//!   "entryPoint": "RunCloudStorage",
//!   "environmentVariables": { "ENABLED_FUNCTIONS": "es-storage" },
//!   "eventTrigger": {
//!     "eventType": "google.storage.object.finalize",
//!     "resource": "projects/_/buckets/my-bucket"
//!   },
//!   "memorySize": 256,
//!   "name": "projects/my-project/locations/europe-west2/functions/es-storage",
//!   "runtime": "go111",
//!   "sourceArchiveUrl": "gs://my-artifacts/es-storage",
//!   "timeout": "30s"
//! }
//! ```
//!
use crate::core::config::GcpConfig;
use crate::provider::gcp::function::FunctionConfig;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Go 1.11, the runtime the function packages are written for.
pub const RUNTIME: &str = "go111";

/// Environment variable telling the deployed binary which handler to enable.
pub const ENABLED_FUNCTIONS_ENV: &str = "ENABLED_FUNCTIONS";

/// A rendered request body: a JSON object keyed by API field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestBody(Map<String, Value>);

impl RequestBody {
    /// Value of an API field, if it was rendered.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[cfg(test)]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of rendered fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty-printed JSON, as shown by `fnpack render`.
    pub fn to_pretty_string(&self) -> String {
        // A map of JSON values always serializes.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }

    fn insert(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }
}

/// `projects/{project}/locations/{location}/functions/{name}`.
pub fn function_resource_name(gcp: &GcpConfig, name: &str) -> String {
    format!(
        "projects/{}/locations/{}/functions/{}",
        gcp.project_id, gcp.location_id, name
    )
}

/// `gs://{bucket}/{name}`, where the archive is uploaded before deployment.
pub fn source_archive_url(gcp: &GcpConfig, name: &str) -> String {
    format!("gs://{}/{}", gcp.storage_name, name)
}

/// Builds the request body for function `name`.
pub fn request_body(gcp: &GcpConfig, name: &str, config: &FunctionConfig) -> RequestBody {
    let mut body = RequestBody(Map::new());
    body.insert("name", Value::from(function_resource_name(gcp, name)));
    body.insert("description", Value::from(config.description.as_str()));
    body.insert("entryPoint", Value::from(config.entry_point.as_str()));
    body.insert("runtime", Value::from(RUNTIME));
    body.insert("sourceArchiveUrl", Value::from(source_archive_url(gcp, name)));
    body.insert("eventTrigger", json!(config.trigger));
    body.insert(
        "environmentVariables",
        json!({ ENABLED_FUNCTIONS_ENV: name }),
    );

    if config.timeout > Duration::ZERO {
        body.insert("timeout", Value::from(format_duration(config.timeout)));
    }
    if config.memory_size > 0 {
        body.insert("memorySize", Value::from(config.memory_size));
    }
    if !config.service_account_email.is_empty() {
        body.insert(
            "serviceAccountEmail",
            Value::from(config.service_account_email.as_str()),
        );
    }
    if !config.labels.is_empty() {
        body.insert("labels", json!(config.labels));
    }
    if config.max_instances > 0 {
        body.insert("maxInstances", Value::from(config.max_instances));
    }
    if !config.vpc_connector.is_empty() {
        body.insert("vpcConnector", Value::from(config.vpc_connector.as_str()));
    }
    body
}

/// Formats a duration the way the API's `Duration` JSON type expects: seconds
/// with an `s` suffix, with fractional digits only when needed.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        return format!("{}s", secs);
    }
    let fraction = format!("{:09}", nanos);
    format!("{}.{}s", secs, fraction.trim_end_matches('0'))
}
