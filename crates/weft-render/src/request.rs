//! Render and parse requests.

use crate::context::RenderContext;
use crate::correlation::RequestId;
use crate::event::EventMeta;

/// A render request and its correlation id.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Template source.
    pub template: String,
    /// Context the template is rendered against.
    pub context: RenderContext,
    /// Identifier shared by the request's events.
    pub request_id: RequestId,
}

impl RenderRequest {
    /// Builds a request with a freshly generated id.
    #[must_use]
    pub fn new(template: impl Into<String>, context: impl Into<RenderContext>) -> Self {
        Self {
            template: template.into(),
            context: context.into(),
            request_id: RequestId::generate(),
        }
    }

    pub(crate) fn meta(&self) -> EventMeta {
        let mut meta = EventMeta::new(self.request_id.clone());
        meta.template = Some(self.template.clone());
        meta.context = Some(self.context.clone());
        meta
    }
}

/// A parse request and its correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    /// Content to compile.
    pub content: String,
    /// Media type of the content.
    pub content_type: String,
    /// Identifier shared by the request's events.
    pub request_id: RequestId,
}

impl ParseRequest {
    /// Builds a request with a freshly generated id.
    #[must_use]
    pub fn new(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            request_id: RequestId::generate(),
        }
    }

    pub(crate) fn meta(&self) -> EventMeta {
        let mut meta = EventMeta::new(self.request_id.clone());
        meta.content = Some(self.content.clone());
        meta.content_type = Some(self.content_type.clone());
        meta
    }
}
