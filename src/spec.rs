//! API document sources
//!
//! The handler asks a `SpecSource` for the document of its configured
//! instance on every `doc.json` request; nothing is cached here.
//!
//! A process-wide registry maps instance names to providers, so documentation
//! generators can register themselves once at startup:
//!
//! ```
//! use swagger_handler::spec::{self, StaticDoc};
//!
//! spec::register("orders", StaticDoc::new(r#"{"openapi":"3.0.3"}"#)).unwrap();
//! assert_eq!(spec::read_doc("orders").unwrap(), r#"{"openapi":"3.0.3"}"#);
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Instance name used when none is configured
pub const DEFAULT_INSTANCE: &str = "swagger";

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Resolves an instance name to a serialized API document
pub trait SpecSource: Send + Sync {
    fn fetch_document(&self, instance_name: &str) -> Result<String>;
}

/// Produces one serialized document (JSON or YAML)
pub trait DocProvider: Send + Sync {
    fn read_doc(&self) -> io::Result<String>;
}

impl<F> DocProvider for F
where
    F: Fn() -> io::Result<String> + Send + Sync,
{
    fn read_doc(&self) -> io::Result<String> {
        self()
    }
}

/// Document held in memory
#[derive(Debug, Clone)]
pub struct StaticDoc(String);

impl StaticDoc {
    pub fn new(doc: impl Into<String>) -> Self {
        Self(doc.into())
    }
}

impl DocProvider for StaticDoc {
    fn read_doc(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Document read from disk on every request
#[derive(Debug, Clone)]
pub struct FileDoc {
    path: PathBuf,
}

impl FileDoc {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocProvider for FileDoc {
    fn read_doc(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Named set of document providers
#[derive(Default)]
pub struct Registry {
    providers: RwLock<HashMap<String, Arc<dyn DocProvider>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider; an empty name registers the default instance
    pub fn register(&self, name: &str, provider: impl DocProvider + 'static) -> Result<()> {
        let name = resolve_name(name);
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if providers.contains_key(name) {
            return Err(Error::DuplicateInstance {
                instance: name.to_string(),
            });
        }
        providers.insert(name.to_string(), Arc::new(provider));
        Ok(())
    }

    pub fn read_doc(&self, name: &str) -> Result<String> {
        let name = resolve_name(name);
        // Guard is dropped before the provider runs
        let provider = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DocNotFound {
                instance: name.to_string(),
            })?;

        provider.read_doc().map_err(|source| Error::DocRead {
            instance: name.to_string(),
            source,
        })
    }
}

impl SpecSource for Registry {
    fn fetch_document(&self, instance_name: &str) -> Result<String> {
        self.read_doc(instance_name)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = providers.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("instances", &names).finish()
    }
}

/// `SpecSource` backed by the process-wide registry
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRegistry;

impl SpecSource for GlobalRegistry {
    fn fetch_document(&self, instance_name: &str) -> Result<String> {
        GLOBAL.read_doc(instance_name)
    }
}

/// Register a provider in the process-wide registry
pub fn register(name: &str, provider: impl DocProvider + 'static) -> Result<()> {
    GLOBAL.register(name, provider)
}

/// Read a document from the process-wide registry
pub fn read_doc(name: &str) -> Result<String> {
    GLOBAL.read_doc(name)
}

fn resolve_name(name: &str) -> &str {
    if name.is_empty() {
        DEFAULT_INSTANCE
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_name_is_default_instance() {
        let registry = Registry::new();
        registry.register("", StaticDoc::new("{}")).unwrap();
        assert_eq!(registry.read_doc(DEFAULT_INSTANCE).unwrap(), "{}");
        assert_eq!(registry.fetch_document("").unwrap(), "{}");
    }

    #[test]
    fn test_unknown_instance() {
        let registry = Registry::new();
        let err = registry.read_doc("missing").unwrap_err();
        assert!(matches!(err, Error::DocNotFound { instance } if instance == "missing"));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let registry = Registry::new();
        registry.register("v1", StaticDoc::new("a")).unwrap();
        let err = registry.register("v1", StaticDoc::new("b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateInstance { .. }));
        assert_eq!(registry.read_doc("v1").unwrap(), "a");
    }

    #[test]
    fn test_closure_provider_runs_per_read() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = Registry::new();
        registry
            .register("live", move || -> io::Result<String> {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(format!("{{\"n\":{n}}}"))
            })
            .unwrap();

        assert_eq!(registry.read_doc("live").unwrap(), r#"{"n":1}"#);
        assert_eq!(registry.read_doc("live").unwrap(), r#"{"n":2}"#);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_file_doc_reads_fresh_and_reports_io_errors() {
        let path = std::env::temp_dir().join(format!(
            "swagger-handler-spec-{}.yaml",
            std::process::id()
        ));
        let registry = Registry::new();
        registry.register("file", FileDoc::new(&path)).unwrap();

        let err = registry.read_doc("file").unwrap_err();
        assert!(matches!(err, Error::DocRead { .. }));

        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "openapi: 3.0.3").unwrap();
        drop(f);
        assert_eq!(registry.read_doc("file").unwrap(), "openapi: 3.0.3");

        std::fs::write(&path, "openapi: 3.1.0").unwrap();
        assert_eq!(registry.read_doc("file").unwrap(), "openapi: 3.1.0");

        let _ = std::fs::remove_file(&path);
    }
}
