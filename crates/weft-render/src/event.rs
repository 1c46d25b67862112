//! Lifecycle events emitted by the render and parse coordinators.
//!
//! Every request produces a started event followed by exactly one success
//! or failure event. All events of one request carry the same
//! [`RequestId`] in their [`EventMeta`].

use std::sync::Arc;

use handlebars::Template;
use strum::{AsRefStr, Display};

use crate::context::RenderContext;
use crate::correlation::RequestId;
use crate::errors::RenderError;
use crate::request::{ParseRequest, RenderRequest};

/// Message used when a failure renders to empty text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Event type names understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum EventKind {
    /// A template render was requested.
    #[strum(serialize = "editor_preview_mustache_render_template_started")]
    RenderStarted,
    /// A template rendered successfully.
    #[strum(serialize = "editor_preview_mustache_render_template_success")]
    RenderSuccess,
    /// A template failed to render.
    #[strum(serialize = "editor_preview_mustache_render_template_failure")]
    RenderFailure,
    /// A template parse was requested.
    #[strum(serialize = "editor_preview_mustache_parse_started")]
    ParseStarted,
    /// A template parsed successfully.
    #[strum(serialize = "editor_preview_mustache_parse_success")]
    ParseSuccess,
    /// A template failed to parse.
    #[strum(serialize = "editor_preview_mustache_parse_failure")]
    ParseFailure,
}

impl EventKind {
    /// Returns `true` for failure kinds.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::RenderFailure | Self::ParseFailure)
    }
}

/// Primary data carried by an event.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// Source text of the template or content being processed.
    Source(String),
    /// Rendered output.
    Rendered(String),
    /// Compiled template.
    Compiled(Box<Template>),
    /// Failure cause.
    Error(Arc<RenderError>),
}

/// Correlation data attached to every event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMeta {
    /// Identifier shared by all events of the request.
    pub request_id: RequestId,
    /// Template source, for render events after the started one.
    pub template: Option<String>,
    /// Content source, for parse events after the started one.
    pub content: Option<String>,
    /// Render context as supplied by the host.
    pub context: Option<RenderContext>,
    /// Content type of a parse request.
    pub content_type: Option<String>,
    /// Human-readable failure message.
    pub error_message: Option<String>,
}

impl EventMeta {
    pub(crate) fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            template: None,
            content: None,
            context: None,
            content_type: None,
            error_message: None,
        }
    }
}

/// One lifecycle event.
#[derive(Debug, Clone)]
pub struct PreviewEvent {
    kind: EventKind,
    payload: EventPayload,
    meta: EventMeta,
}

impl PreviewEvent {
    /// Event type.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Primary data.
    #[must_use]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Correlation data.
    #[must_use]
    pub const fn meta(&self) -> &EventMeta {
        &self.meta
    }

    /// Identifier shared by the request's events.
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        &self.meta.request_id
    }

    /// Returns `true` when the event reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.kind.is_failure()
    }

    pub(crate) fn render_started(request: &RenderRequest) -> Self {
        let mut meta = EventMeta::new(request.request_id.clone());
        meta.context = Some(request.context.clone());
        Self {
            kind: EventKind::RenderStarted,
            payload: EventPayload::Source(request.template.clone()),
            meta,
        }
    }

    pub(crate) fn render_success(request: &RenderRequest, rendered: &str) -> Self {
        Self {
            kind: EventKind::RenderSuccess,
            payload: EventPayload::Rendered(rendered.to_owned()),
            meta: request.meta(),
        }
    }

    pub(crate) fn render_failure(request: &RenderRequest, error: Arc<RenderError>) -> Self {
        let mut meta = request.meta();
        meta.error_message = Some(failure_message(&error));
        Self {
            kind: EventKind::RenderFailure,
            payload: EventPayload::Error(error),
            meta,
        }
    }

    pub(crate) fn parse_started(request: &ParseRequest) -> Self {
        let mut meta = EventMeta::new(request.request_id.clone());
        meta.content_type = Some(request.content_type.clone());
        Self {
            kind: EventKind::ParseStarted,
            payload: EventPayload::Source(request.content.clone()),
            meta,
        }
    }

    pub(crate) fn parse_success(request: &ParseRequest, template: Template) -> Self {
        Self {
            kind: EventKind::ParseSuccess,
            payload: EventPayload::Compiled(Box::new(template)),
            meta: request.meta(),
        }
    }

    pub(crate) fn parse_failure(request: &ParseRequest, error: Arc<RenderError>) -> Self {
        let mut meta = request.meta();
        meta.error_message = Some(failure_message(&error));
        Self {
            kind: EventKind::ParseFailure,
            payload: EventPayload::Error(error),
            meta,
        }
    }
}

/// Describes `error` for display, falling back to a generic message.
#[must_use]
pub fn failure_message(error: &RenderError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_owned()
    } else {
        message
    }
}

/// Receives lifecycle events.
pub trait RenderEventSink: Send + Sync {
    /// Delivers one event.
    fn emit(&self, event: PreviewEvent);
}

impl<F> RenderEventSink for F
where
    F: Fn(PreviewEvent) + Send + Sync,
{
    fn emit(&self, event: PreviewEvent) {
        self(event);
    }
}
