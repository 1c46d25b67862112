//! Shared fixtures and helpers for worker tests.

mod counting_worker;
mod recording_engine;

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use lsp_types::Uri;
use rstest::fixture;
use weft_config::{EngineConfig, WorkerCreateData};

use crate::document::{MirroredBuffer, SharedMirror};
use crate::engine::{EngineError, EngineFactory, LanguageEngine};

pub use counting_worker::CountingWorker;
pub use recording_engine::{CallKind, RecordingEngine, ResponseSet};
pub use world::TestWorld;

/// Parses a URI, panicking on malformed test input.
pub fn uri(value: &str) -> Uri {
    Uri::from_str(value).unwrap_or_else(|error| panic!("invalid test URI {value}: {error}"))
}

/// Common URI mirrored by most tests.
#[fixture]
pub fn sample_uri() -> Uri {
    uri("file:///templates/greeting.hbs")
}

/// Mirror holding the sample document at version 1.
#[fixture]
pub fn sample_mirror() -> SharedMirror {
    let mirror = SharedMirror::new();
    mirror.upsert(MirroredBuffer::new(sample_uri(), 1, "Hello {{name}}"));
    mirror
}

/// Creation parameters for a plain handlebars worker.
#[must_use]
pub fn create_data() -> WorkerCreateData {
    WorkerCreateData::for_language("handlebars")
}

/// Engine factory that hands out one engine and records every config it saw.
#[derive(Clone)]
pub struct StubFactory {
    engine: Arc<dyn LanguageEngine>,
    configs: Arc<Mutex<Vec<EngineConfig>>>,
    failure: Option<String>,
}

impl StubFactory {
    /// Factory always returning `engine`.
    pub fn new(engine: RecordingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            configs: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Factory rejecting every configuration with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        let mut factory = Self::new(RecordingEngine::new(ResponseSet::default()));
        factory.failure = Some(message.into());
        factory
    }

    /// Configurations passed to [`EngineFactory::create_engine`], in order.
    pub fn configs(&self) -> Vec<EngineConfig> {
        self.configs
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl EngineFactory for StubFactory {
    fn create_engine(&self, config: &EngineConfig) -> Result<Arc<dyn LanguageEngine>, EngineError> {
        self.configs
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(config.clone());
        match &self.failure {
            Some(message) => Err(EngineError::new(message.clone())),
            None => Ok(Arc::clone(&self.engine)),
        }
    }
}
