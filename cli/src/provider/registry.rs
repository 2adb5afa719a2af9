//! # Function Registry (`provider::registry`)
//!
//! File: cli/src/provider/registry.rs
//!
//! ## Overview
//!
//! The registry maps function names to registered functions and lists the
//! function types each provider ships. Builders only see the `Registry` trait;
//! `FunctionRegistry` is the implementation assembled from the configuration.
//!
use crate::core::config::Config;
use crate::core::error::{FnpackError, Result};
use crate::provider::gcp::function::{FunctionKind, GcpFunction};
use crate::provider::gcp::PROVIDER;
use crate::provider::Function;
use anyhow::{anyhow, Context};
use tracing::debug;

/// Lookup interface consumed by the template builders.
pub trait Registry: Send + Sync {
    /// Finds a registered function by name.
    ///
    /// Fails with `FnpackError::FunctionNotFound` when nothing is registered
    /// under `name`.
    fn find_function_by_name(&self, name: &str) -> Result<&dyn Function>;

    /// Lists the function type names available for `provider`, in
    /// registration order.
    fn list_functions(&self, provider: &str) -> Result<Vec<String>>;
}

/// Registry built from the configured `[[functions]]` entries.
pub struct FunctionRegistry {
    kinds: Vec<FunctionKind>,
    functions: Vec<Box<dyn Function>>,
}

impl FunctionRegistry {
    /// Creates a registry with the given function types and instances.
    pub fn new(kinds: Vec<FunctionKind>, functions: Vec<Box<dyn Function>>) -> Self {
        Self { kinds, functions }
    }

    /// Registers every GCP function type and every configured function.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut functions: Vec<Box<dyn Function>> = Vec::with_capacity(config.functions.len());
        for entry in &config.functions {
            let function = GcpFunction::from_entry(entry)
                .with_context(|| format!("Invalid configuration for function '{}'", entry.name))?;
            debug!(
                "Registered function '{}' (type: {})",
                entry.name,
                function.kind()
            );
            functions.push(Box::new(function));
        }
        Ok(Self::new(FunctionKind::ALL.to_vec(), functions))
    }
}

impl Registry for FunctionRegistry {
    fn find_function_by_name(&self, name: &str) -> Result<&dyn Function> {
        self.functions
            .iter()
            .find(|f| f.name() == name)
            .map(|f| &**f)
            .ok_or_else(|| {
                anyhow!(FnpackError::FunctionNotFound {
                    name: name.to_string(),
                })
            })
    }

    fn list_functions(&self, provider: &str) -> Result<Vec<String>> {
        if provider != PROVIDER {
            return Err(anyhow!(FnpackError::UnknownProvider {
                provider: provider.to_string(),
            }));
        }
        Ok(self
            .kinds
            .iter()
            .map(|kind| kind.type_name().to_string())
            .collect())
    }
}
