//! # GCP Template Builder (`provider::gcp::template_builder`)
//!
//! File: cli/src/provider/gcp/template_builder.rs
//!
//! ## Overview
//!
//! Produces what a deployment client needs for one function: the zip archive
//! of its sources and the request body registering it with Cloud Functions.
//!
//! ## Architecture
//!
//! 1. Resolve the function by name in the registry and check it can be
//!    packaged (`find_function`).
//! 2. Zip the three source files of its type (`zip_resources`):
//!    `pkg/<type>/<type>.go` (0755), `pkg/<type>/go.mod` and
//!    `pkg/<type>/go.sum` (0655).
//! 3. Render the request body (`request::request_body`).
//!
//! The builder keeps no state between calls beyond its provider settings,
//! package root and registry handle; it is cheap to clone and safe to share.
//!
use crate::common::archive::{self, Resource};
use crate::core::config::GcpConfig;
use crate::core::error::{FnpackError, Result};
use crate::provider::gcp::request::{self, RequestBody};
use crate::provider::gcp::{Installer, PROVIDER};
use crate::provider::Registry;
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Output of a successful build.
#[derive(Debug, Clone)]
pub struct FunctionData {
    /// Zip archive of the function sources.
    pub raw: Vec<u8>,
    pub request_body: RequestBody,
}

/// Builds archives and request bodies for functions deployed to GCP.
#[derive(Clone)]
pub struct TemplateBuilder {
    gcp: GcpConfig,
    package_root: PathBuf,
    registry: Arc<dyn Registry>,
}

impl TemplateBuilder {
    /// Creates a builder.
    ///
    /// # Arguments
    ///
    /// * `gcp` - Project, location and storage bucket the functions deploy to.
    /// * `package_root` - Directory containing the `pkg/<type>/` source trees.
    /// * `registry` - Where function names are resolved.
    ///
    /// # Errors
    ///
    /// Returns `FnpackError::Config` when a provider setting is empty or blank,
    /// the same rule configuration validation applies.
    pub fn new(
        gcp: GcpConfig,
        package_root: impl Into<PathBuf>,
        registry: Arc<dyn Registry>,
    ) -> Result<Self> {
        if [&gcp.project_id, &gcp.location_id, &gcp.storage_name]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(anyhow!(FnpackError::Config(
                "project_id, location_id and storage_name are required to build GCP functions"
                    .to_string()
            )));
        }
        Ok(Self {
            gcp,
            package_root: package_root.into(),
            registry,
        })
    }

    /// Directory the `pkg/<type>/` sources are read from.
    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Resolves `name`, zips its sources and renders its request body.
    ///
    /// # Errors
    ///
    /// * `FnpackError::FunctionNotFound` if `name` is not registered.
    /// * `FnpackError::IncompatibleFunction` if it cannot be packaged.
    /// * `FnpackError::Io` if a source file is missing or unreadable; no
    ///   partial archive is returned.
    pub fn build(&self, name: &str) -> Result<FunctionData> {
        debug!("Compressing all assets into an artifact");

        let function = find_function(self.registry.as_ref(), name)?;
        let resources = zip_resources(function.type_name());
        let raw = archive::zip::make_zip(&self.package_root, &resources)?;

        debug!("Compression is successful (zip size: {} bytes)", raw.len());

        Ok(FunctionData {
            raw,
            request_body: self.request_body(name, function),
        })
    }

    /// Renders the request body of `name` as pretty JSON without building
    /// the archive.
    pub fn raw_template(&self, name: &str) -> Result<String> {
        let function = find_function(self.registry.as_ref(), name)?;
        Ok(self.request_body(name, function).to_pretty_string())
    }

    /// Every file bundled for any GCP function type, grouped by type in the
    /// order the registry lists them. Empty when the listing fails.
    pub fn list_archive_resources(&self) -> Vec<Resource> {
        list_archive_resources(self.registry.as_ref())
    }

    fn request_body(&self, name: &str, function: &dyn Installer) -> RequestBody {
        request::request_body(&self.gcp, name, function.config())
    }
}

/// Looks up `name` and returns its packaging capability.
///
/// Fails with `FnpackError::FunctionNotFound` for unknown names and
/// `FnpackError::IncompatibleFunction` for functions that cannot be packaged.
pub fn find_function<'a>(registry: &'a dyn Registry, name: &str) -> Result<&'a dyn Installer> {
    let function = registry.find_function_by_name(name)?;
    function.installer().ok_or_else(|| {
        anyhow!(FnpackError::IncompatibleFunction {
            name: name.to_string(),
        })
    })
}

/// See [`TemplateBuilder::list_archive_resources`].
pub fn list_archive_resources(registry: &dyn Registry) -> Vec<Resource> {
    let types = match registry.list_functions(PROVIDER) {
        Ok(types) => types,
        Err(e) => {
            debug!("Could not list {} functions: {}", PROVIDER, e);
            return Vec::new();
        }
    };
    types.iter().flat_map(|t| zip_resources(t)).collect()
}

/// Files bundled for function type `type_name`.
pub fn zip_resources(type_name: &str) -> Vec<Resource> {
    let dir = Path::new("pkg").join(type_name);
    vec![
        Resource::new(dir.join(format!("{}.go", type_name)), 0o755),
        Resource::new(dir.join("go.mod"), 0o655),
        Resource::new(dir.join("go.sum"), 0o655),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::provider::gcp::function::{FunctionKind, GcpFunction};
    use crate::provider::{Function, FunctionRegistry};
    use serde_json::{json, Value};
    use std::fs;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};
    use zip::ZipArchive;

    /// A registered function without the packaging capability.
    struct Opaque;

    impl Function for Opaque {
        fn name(&self) -> &str {
            "opaque"
        }
    }

    const CONFIG: &str = r#"
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
    "#;

    fn package_root() -> TempDir {
        let dir = tempdir().unwrap();
        for type_name in ["storage", "pubsub"] {
            let pkg = dir.path().join("pkg").join(type_name);
            fs::create_dir_all(&pkg).unwrap();
            fs::write(pkg.join(format!("{}.go", type_name)), "package main\n").unwrap();
            fs::write(pkg.join("go.mod"), "module x\n").unwrap();
            fs::write(pkg.join("go.sum"), "").unwrap();
        }
        dir
    }

    fn builder(root: &Path) -> TemplateBuilder {
        let config: Config = toml::from_str(CONFIG).unwrap();
        let mut functions: Vec<Box<dyn Function>> = config
            .functions
            .iter()
            .map(|entry| Box::new(GcpFunction::from_entry(entry).unwrap()) as Box<dyn Function>)
            .collect();
        functions.push(Box::new(Opaque));
        let registry = FunctionRegistry::new(
            vec![FunctionKind::Storage, FunctionKind::PubSub],
            functions,
        );
        TemplateBuilder::new(config.gcp, root, Arc::new(registry)).unwrap()
    }

    #[test]
    fn test_build_es_storage() -> Result<()> {
        let root = package_root();
        let data = builder(root.path()).build("es-storage")?;

        let body = &data.request_body;
        assert_eq!(body.get("timeout"), Some(&json!("30s")));
        assert_eq!(body.get("memorySize"), Some(&json!(256)));
        assert_eq!(body.get("description"), Some(&json!("sync events")));
        for absent in ["serviceAccountEmail", "labels", "maxInstances", "vpcConnector"] {
            assert!(!body.contains(absent), "unexpected {}", absent);
        }

        let mut archive = ZipArchive::new(Cursor::new(data.raw))?;
        assert_eq!(archive.len(), 3);
        for index in 0..archive.len() {
            assert!(archive.by_index(index)?.name().starts_with("pkg/storage/"));
        }
        Ok(())
    }

    #[test]
    fn test_build_missing_function() {
        let root = package_root();
        let err = builder(root.path()).build("missing-fn").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FnpackError>(),
            Some(FnpackError::FunctionNotFound { .. })
        ));
    }

    #[test]
    fn test_find_function_incompatible() {
        let root = package_root();
        let builder = builder(root.path());
        let err = match find_function(builder.registry.as_ref(), "opaque") {
            Ok(_) => panic!("opaque function must not resolve"),
            Err(e) => e,
        };
        assert!(matches!(
            err.downcast_ref::<FnpackError>(),
            Some(FnpackError::IncompatibleFunction { .. })
        ));
        assert!(builder.raw_template("opaque").is_err());
    }

    #[test]
    fn test_build_fails_when_source_missing() {
        let root = package_root();
        fs::remove_file(root.path().join("pkg/storage/go.sum")).unwrap();
        let err = builder(root.path()).build("es-storage").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FnpackError>(),
            Some(FnpackError::Io { .. })
        ));
    }

    #[test]
    fn test_raw_template_without_sources() -> Result<()> {
        let empty = tempdir()?;
        let text = builder(empty.path()).raw_template("es-storage")?;
        let parsed: Value = serde_json::from_str(&text)?;
        assert_eq!(
            parsed["name"],
            json!("projects/my-project/locations/europe-west2/functions/es-storage")
        );
        assert_eq!(parsed["environmentVariables"]["ENABLED_FUNCTIONS"], json!("es-storage"));
        Ok(())
    }

    #[test]
    fn test_list_archive_resources_groups_by_type() {
        let root = package_root();
        let resources = builder(root.path()).list_archive_resources();
        let names: Vec<String> = resources.iter().map(Resource::archive_name).collect();
        assert_eq!(
            names,
            vec![
                "pkg/storage/storage.go",
                "pkg/storage/go.mod",
                "pkg/storage/go.sum",
                "pkg/pubsub/pubsub.go",
                "pkg/pubsub/go.mod",
                "pkg/pubsub/go.sum",
            ]
        );
        let modes: Vec<u32> = resources.iter().map(Resource::mode).collect();
        assert_eq!(modes, vec![0o755, 0o655, 0o655, 0o755, 0o655, 0o655]);
    }

    #[test]
    fn test_zip_resources_deterministic() {
        assert_eq!(zip_resources("storage"), zip_resources("storage"));
        assert_ne!(zip_resources("storage"), zip_resources("pubsub"));
    }

    #[test]
    fn test_new_rejects_incomplete_settings() {
        let registry: Arc<dyn Registry> =
            Arc::new(FunctionRegistry::new(FunctionKind::ALL.to_vec(), Vec::new()));
        let err = TemplateBuilder::new(GcpConfig::default(), ".", registry)
            .err()
            .expect("construction must fail");
        assert!(matches!(
            err.downcast_ref::<FnpackError>(),
            Some(FnpackError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_blank_settings() {
        let registry: Arc<dyn Registry> =
            Arc::new(FunctionRegistry::new(FunctionKind::ALL.to_vec(), Vec::new()));
        let gcp = GcpConfig {
            project_id: "   ".to_string(),
            location_id: "europe-west2".to_string(),
            storage_name: "my-artifacts".to_string(),
        };
        assert!(TemplateBuilder::new(gcp, ".", registry).is_err());
    }

    /// A registry whose listing always fails.
    struct Unlistable;

    impl Registry for Unlistable {
        fn find_function_by_name(&self, name: &str) -> Result<&dyn Function> {
            Err(anyhow!(FnpackError::FunctionNotFound {
                name: name.to_string(),
            }))
        }

        fn list_functions(&self, provider: &str) -> Result<Vec<String>> {
            Err(anyhow!(FnpackError::UnknownProvider {
                provider: provider.to_string(),
            }))
        }
    }

    #[test]
    fn test_list_archive_resources_empty_when_listing_fails() {
        let gcp: GcpConfig = toml::from_str::<Config>(CONFIG).unwrap().gcp;
        let builder = TemplateBuilder::new(gcp, ".", Arc::new(Unlistable)).unwrap();
        assert!(builder.list_archive_resources().is_empty());
        assert!(list_archive_resources(&Unlistable).is_empty());
    }
}
