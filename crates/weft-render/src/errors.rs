//! Error types surfaced by the render and parse coordinators.

use std::error::Error;

use thiserror::Error;
use weft_worker::WorkerError;

/// Failure reported by a host accessor such as the active editor lookup.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HostAccessError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl HostAccessError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Errors that turn a render or parse request into a failure event.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template does not compile.
    #[error("template failed to compile: {0}")]
    Compile(#[source] handlebars::TemplateError),

    /// The compiled template failed while rendering.
    #[error("template failed to render: {0}")]
    Render(#[source] handlebars::RenderError),

    /// The render context is not valid JSON.
    #[error("render context is not valid JSON: {0}")]
    Context(#[source] serde_json::Error),

    /// The active editor or its model could not be resolved.
    #[error("active editor unavailable: {0}")]
    Editor(#[source] HostAccessError),

    /// No language worker could be obtained for the editor model.
    #[error("language worker unavailable: {0}")]
    WorkerUnavailable(#[source] HostAccessError),

    /// The language worker failed the render call.
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// The rendering service reported failure through its result text.
    #[error("{message}")]
    Engine {
        /// First line of the service's error text.
        message: String,
    },
}
