//! Template preview coordination.
//!
//! [`RenderCoordinator`] renders a template either through the language
//! worker bound to the active editor or locally with Handlebars, as chosen by
//! [`RenderMode`]. [`ParseCoordinator`] compile-checks templates. Both assign
//! a [`RequestId`] to every request and report its lifecycle as
//! [`PreviewEvent`]s to a [`RenderEventSink`].

#![deny(missing_docs)]

mod context;
mod coordinator;
mod correlation;
mod errors;
mod event;
pub mod local;
mod mode;
mod request;

#[cfg(test)]
mod tests;

pub use context::RenderContext;
pub use coordinator::{
    ParseCoordinator, ParseOutcome, RENDER_ERROR_SENTINEL, RenderCoordinator, RenderOutcome,
};
pub use correlation::{REQUEST_ID_LENGTH, RequestId};
pub use errors::{HostAccessError, RenderError};
pub use event::{
    EventKind, EventMeta, EventPayload, PreviewEvent, RenderEventSink, UNKNOWN_ERROR_MESSAGE,
    failure_message,
};
pub use mode::{ActiveEditor, RenderMode, WorkerProvider};
pub use request::{ParseRequest, RenderRequest};
