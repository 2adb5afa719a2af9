//! # Google Cloud Functions Provider (`provider::gcp`)
//!
//! File: cli/src/provider/gcp/mod.rs
//!
//! ## Overview
//!
//! Everything needed to deploy a configured function to Google Cloud
//! Functions, short of the upload itself:
//!
//! - **`function`**: function kinds (`pubsub`, `storage`) and their typed config.
//! - **`request`**: renders the JSON body POSTed to the Cloud Functions API.
//! - **`template_builder`**: resolves a function, zips its sources and renders
//!   its request body.
//!
//! ## Usage
//!
//! ```rust
//! let registry = Arc::new(FunctionRegistry::from_config(&cfg)?);
//! let builder = TemplateBuilder::new(cfg.gcp.clone(), &cfg.package_root, registry)?;
//! let data = builder.build("es-storage")?;
//! // upload data.raw to gs://<storage_name>/es-storage, then POST data.request_body
//! ```
//!
pub mod function;
pub mod request;
pub mod template_builder;

use function::FunctionConfig;

pub use template_builder::TemplateBuilder;

/// Provider identifier used for registry listings.
pub const PROVIDER: &str = "gcp";

/// Capability of a registered function that can be packaged for GCP.
pub trait Installer: Send + Sync {
    /// Source package name, which determines the archived files.
    fn type_name(&self) -> &str;

    fn config(&self) -> &FunctionConfig;
}
