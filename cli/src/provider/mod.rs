//! # fnpack Providers (`provider`)
//!
//! File: cli/src/provider/mod.rs
//!
//! ## Overview
//!
//! Cloud provider integrations. A provider contributes function types (source
//! packages that can be deployed) and knows how to turn a configured function
//! into deployment artifacts.
//!
//! ## Architecture
//!
//! - **`registry`**: the `Registry` trait the builders consume, plus
//!   `FunctionRegistry`, the implementation backed by the configuration file.
//! - **`gcp`**: Google Cloud Functions: typed function config, request body
//!   rendering, and the `TemplateBuilder` that produces the archive and request.
//!
//! Registered functions implement `Function`. Whether a function can be
//! packaged is a capability, queried through `Function::installer`, rather
//! than something callers discover by downcasting.
//!
pub mod gcp;
pub mod registry;

pub use registry::{FunctionRegistry, Registry};

/// A function known to a registry.
pub trait Function: Send + Sync {
    /// Name the function is registered under.
    fn name(&self) -> &str;

    /// The packaging capability, when the function supports it.
    fn installer(&self) -> Option<&dyn gcp::Installer> {
        None
    }
}
