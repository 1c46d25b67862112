//! Host-registered extensions that wrap or replace the default worker.
//!
//! A host that supports extensions owns an [`ExtensionRegistry`] and fills
//! it before any worker is created. Creation parameters then name the
//! extensions to apply; [`ExtensionLoader`] looks each name up, hands the
//! current worker plus an [`ExtensionToolkit`] to the registered factory, and
//! checks the replacement still honours [`CapabilitySet::required`].
//!
//! Misconfiguration is fatal: once an extension was explicitly requested
//! there is no safe worker to fall back to.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use weft_config::{EngineConfig, EngineConfigOverrides, Merge, WorkerCreateData, merge_json};

use crate::capability::CapabilitySet;
use crate::document::{BufferMirror, DocumentResolver};
use crate::engine::{EngineFactory, LanguageEngine};
use crate::errors::{ExtensionError, WorkerError};
use crate::facade::WorkerFacade;
use crate::telemetry;
use crate::worker::LanguageWorker;

/// Builds a replacement worker from the current one.
pub type ExtensionFactory = Arc<
    dyn Fn(Box<dyn LanguageWorker>, &ExtensionToolkit) -> Box<dyn LanguageWorker> + Send + Sync,
>;

/// Dependencies handed to every extension factory.
#[derive(Clone)]
pub struct ExtensionToolkit {
    engine_factory: Arc<dyn EngineFactory>,
    engine: Arc<dyn LanguageEngine>,
    resolver: Arc<dyn DocumentResolver>,
    config: EngineConfig,
}

impl ExtensionToolkit {
    /// Captures the collaborators of `base`.
    #[must_use]
    pub fn new(engine_factory: Arc<dyn EngineFactory>, base: &WorkerFacade) -> Self {
        Self {
            engine_factory,
            engine: base.engine(),
            resolver: base.resolver(),
            config: base.config().clone(),
        }
    }

    /// Factory able to build further engines.
    #[must_use]
    pub fn engine_factory(&self) -> Arc<dyn EngineFactory> {
        Arc::clone(&self.engine_factory)
    }

    /// Engine used by the default worker.
    #[must_use]
    pub fn engine(&self) -> Arc<dyn LanguageEngine> {
        Arc::clone(&self.engine)
    }

    /// Resolver used by the default worker.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn DocumentResolver> {
        Arc::clone(&self.resolver)
    }

    /// Merged configuration of the default worker.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Layers further overrides onto the default worker's configuration.
    #[must_use]
    pub fn merge_config(&self, overrides: &EngineConfigOverrides) -> EngineConfig {
        self.config.merge(overrides)
    }

    /// Deep-merges two JSON values with the worker's merge rules.
    #[must_use]
    pub fn merge_json(&self, base: &Value, overrides: &Value) -> Value {
        merge_json(base, overrides)
    }

    /// Builds a facade over `engine` sharing the default worker's resolver.
    #[must_use]
    pub fn facade_with_engine(&self, engine: Arc<dyn LanguageEngine>) -> WorkerFacade {
        WorkerFacade::from_parts(self.resolver(), engine, self.config.clone())
    }
}

/// Named extension factories supplied by the host.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    factories: HashMap<String, ExtensionFactory>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::BlankName`] for blank names and
    /// [`ExtensionError::Duplicate`] when the name is taken.
    pub fn register<F>(
        &mut self,
        extension_name: impl Into<String>,
        factory: F,
    ) -> Result<(), ExtensionError>
    where
        F: Fn(Box<dyn LanguageWorker>, &ExtensionToolkit) -> Box<dyn LanguageWorker>
            + Send
            + Sync
            + 'static,
    {
        let name = extension_name.into();
        if name.trim().is_empty() {
            return Err(ExtensionError::BlankName);
        }
        if self.factories.contains_key(&name) {
            return Err(ExtensionError::Duplicate { name });
        }
        self.factories.insert(name, Arc::new(factory));
        Ok(())
    }

    /// Looks up a factory by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ExtensionFactory> {
        self.factories.get(name).cloned()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ExtensionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Applies the extensions named in the creation parameters.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionLoader<'a> {
    registry: Option<&'a ExtensionRegistry>,
}

impl<'a> ExtensionLoader<'a> {
    /// Builds a loader. `None` means the host cannot provide extensions.
    #[must_use]
    pub const fn new(registry: Option<&'a ExtensionRegistry>) -> Self {
        Self { registry }
    }

    /// Produces the worker the host should use.
    ///
    /// With no requested extensions, or a host without extension support,
    /// `base` is returned unchanged. Otherwise every requested extension is
    /// applied in order, each wrapping the result of the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::FactoryNotRegistered`] for an unknown name
    /// and [`ExtensionError::ContractViolation`] when a replacement drops a
    /// required capability.
    pub fn build(
        self,
        base: Box<dyn LanguageWorker>,
        toolkit: &ExtensionToolkit,
        requested: &[String],
    ) -> Result<Box<dyn LanguageWorker>, ExtensionError> {
        if requested.is_empty() {
            return Ok(base);
        }
        let Some(registry) = self.registry else {
            warn!(
                extensions = ?requested,
                "host does not support worker extensions; using the default worker"
            );
            return Ok(base);
        };

        let required = CapabilitySet::required();
        let mut worker = base;
        for name in requested {
            let factory = registry
                .get(name)
                .ok_or_else(|| ExtensionError::FactoryNotRegistered { name: name.clone() })?;
            worker = factory(worker, toolkit);
            let missing = worker.capabilities().missing_from(&required);
            if !missing.is_empty() {
                return Err(ExtensionError::ContractViolation {
                    name: name.clone(),
                    missing,
                });
            }
            info!(extension = name.as_str(), "worker extension applied");
        }
        Ok(worker)
    }
}

/// Creates the worker for a host: default facade plus requested extensions.
///
/// Installs telemetry from `create_data.log` first. A telemetry failure is
/// logged and does not prevent creation.
///
/// # Errors
///
/// Returns [`WorkerError::Engine`] when the engine cannot be built and
/// [`WorkerError::Extension`] when extension loading fails.
pub fn create_worker(
    mirror: Arc<dyn BufferMirror>,
    create_data: &WorkerCreateData,
    engine_factory: Arc<dyn EngineFactory>,
    extensions: Option<&ExtensionRegistry>,
) -> Result<Box<dyn LanguageWorker>, WorkerError> {
    if let Err(error) = telemetry::initialise(&create_data.log) {
        warn!(%error, "worker telemetry was not installed");
    }
    let base = WorkerFacade::create(mirror, create_data, engine_factory.as_ref())?;
    let toolkit = ExtensionToolkit::new(engine_factory, &base);
    let worker = ExtensionLoader::new(extensions).build(
        Box::new(base),
        &toolkit,
        &create_data.custom_worker_extensions,
    )?;
    Ok(worker)
}
