//! Orchestrates template rendering and template parsing requests.

use std::sync::Arc;

use handlebars::Template;
use tracing::{debug, warn};

use crate::context::RenderContext;
use crate::errors::RenderError;
use crate::event::{PreviewEvent, RenderEventSink, failure_message};
use crate::local;
use crate::mode::RenderMode;
use crate::request::{ParseRequest, RenderRequest};

/// Leading text a rendering service uses to report failure in its result.
pub const RENDER_ERROR_SENTINEL: &str = "ERROR RENDERING:";

/// Result of one render request.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// The template rendered.
    Success {
        /// The originating request.
        request: RenderRequest,
        /// Rendered output.
        rendered: String,
    },
    /// The template could not be rendered.
    Failure {
        /// The originating request.
        request: RenderRequest,
        /// Failure cause.
        error: Arc<RenderError>,
        /// Human-readable failure message.
        message: String,
    },
}

impl RenderOutcome {
    /// The originating request.
    #[must_use]
    pub const fn request(&self) -> &RenderRequest {
        match self {
            Self::Success { request, .. } | Self::Failure { request, .. } => request,
        }
    }

    /// Rendered output on success.
    #[must_use]
    pub fn rendered(&self) -> Option<&str> {
        match self {
            Self::Success { rendered, .. } => Some(rendered.as_str()),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message on failure.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message.as_str()),
        }
    }

    /// Returns `true` on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Renders templates and reports each request's lifecycle to a sink.
#[derive(Clone)]
pub struct RenderCoordinator {
    sink: Arc<dyn RenderEventSink>,
}

impl RenderCoordinator {
    /// Builds a coordinator emitting to `sink`.
    #[must_use]
    pub const fn new(sink: Arc<dyn RenderEventSink>) -> Self {
        Self { sink }
    }

    /// Renders `template` against `context` using `mode`.
    ///
    /// Emits a started event, then exactly one success or failure event.
    /// Failures never escape as errors; they are reported through the sink
    /// and the returned outcome.
    pub async fn render(
        &self,
        template: &str,
        context: impl Into<RenderContext>,
        mode: &RenderMode,
    ) -> RenderOutcome {
        let request = RenderRequest::new(template, context);
        debug!(
            request_id = request.request_id.as_str(),
            mode = mode.label(),
            "template render started"
        );
        self.sink.emit(PreviewEvent::render_started(&request));

        match execute(&request, mode).await {
            Ok(rendered) => {
                debug!(
                    request_id = request.request_id.as_str(),
                    "template render succeeded"
                );
                self.sink
                    .emit(PreviewEvent::render_success(&request, &rendered));
                RenderOutcome::Success { request, rendered }
            }
            Err(failure) => {
                let error = Arc::new(failure);
                let message = failure_message(&error);
                warn!(
                    request_id = request.request_id.as_str(),
                    error = message.as_str(),
                    "template render failed"
                );
                self.sink
                    .emit(PreviewEvent::render_failure(&request, Arc::clone(&error)));
                RenderOutcome::Failure {
                    request,
                    error,
                    message,
                }
            }
        }
    }
}

async fn execute(request: &RenderRequest, mode: &RenderMode) -> Result<String, RenderError> {
    match mode {
        RenderMode::Remote { editor, workers } => {
            let uri = editor.model_uri().await.map_err(RenderError::Editor)?;
            let worker = workers
                .worker_for(&uri)
                .await
                .map_err(RenderError::WorkerUnavailable)?;
            let rendered = worker.render_template(&request.template).await?;
            if rendered.starts_with(RENDER_ERROR_SENTINEL) {
                let message = rendered
                    .split('\n')
                    .next()
                    .unwrap_or(RENDER_ERROR_SENTINEL)
                    .to_owned();
                return Err(RenderError::Engine { message });
            }
            Ok(rendered)
        }
        RenderMode::Local => {
            let template = local::compile(&request.template)?;
            let context = request.context.parse()?;
            local::render_compiled(template, &context)
        }
    }
}

/// Result of one parse request.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// The content compiled.
    Success {
        /// The originating request.
        request: ParseRequest,
        /// Compiled template.
        template: Box<Template>,
    },
    /// The content failed to compile.
    Failure {
        /// The originating request.
        request: ParseRequest,
        /// Compile error.
        error: Arc<RenderError>,
    },
}

impl ParseOutcome {
    /// The originating request.
    #[must_use]
    pub const fn request(&self) -> &ParseRequest {
        match self {
            Self::Success { request, .. } | Self::Failure { request, .. } => request,
        }
    }

    /// Returns `true` on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Compile-checks templates and reports each request's lifecycle to a sink.
#[derive(Clone)]
pub struct ParseCoordinator {
    sink: Arc<dyn RenderEventSink>,
}

impl ParseCoordinator {
    /// Builds a coordinator emitting to `sink`.
    #[must_use]
    pub const fn new(sink: Arc<dyn RenderEventSink>) -> Self {
        Self { sink }
    }

    /// Compiles `content`, reporting the compiled template or the error.
    pub fn parse(&self, content: &str, content_type: &str) -> ParseOutcome {
        let request = ParseRequest::new(content, content_type);
        debug!(
            request_id = request.request_id.as_str(),
            content_type, "template parse started"
        );
        self.sink.emit(PreviewEvent::parse_started(&request));

        match local::compile(&request.content) {
            Ok(template) => {
                self.sink
                    .emit(PreviewEvent::parse_success(&request, template.clone()));
                ParseOutcome::Success {
                    request,
                    template: Box::new(template),
                }
            }
            Err(failure) => {
                let error = Arc::new(failure);
                warn!(
                    request_id = request.request_id.as_str(),
                    %error,
                    "template parse failed"
                );
                self.sink
                    .emit(PreviewEvent::parse_failure(&request, Arc::clone(&error)));
                ParseOutcome::Failure { request, error }
            }
        }
    }
}
