//! BDD test world for the preview coordinators.

use std::sync::Arc;

use futures::executor::block_on;
use serde_json::json;

use crate::coordinator::{ParseCoordinator, ParseOutcome, RenderCoordinator, RenderOutcome};
use crate::mode::RenderMode;

use super::RecordingSink;

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    /// Events emitted by either coordinator.
    pub sink: RecordingSink,
    /// Mode handed to the render coordinator.
    pub mode: RenderMode,
    /// Outcome of the last render.
    pub render_outcome: Option<RenderOutcome>,
    /// Outcome of the last parse.
    pub parse_outcome: Option<ParseOutcome>,
}

impl TestWorld {
    /// World rendering locally.
    pub fn new() -> Self {
        Self {
            sink: RecordingSink::default(),
            mode: RenderMode::Local,
            render_outcome: None,
            parse_outcome: None,
        }
    }

    /// Renders `template` with `{ "name": name }`.
    pub fn render_for_name(&mut self, template: &str, name: &str) {
        let coordinator = RenderCoordinator::new(Arc::new(self.sink.clone()));
        let outcome = block_on(coordinator.render(template, json!({ "name": name }), &self.mode));
        self.render_outcome = Some(outcome);
    }

    /// Parses `content` as `content_type`.
    pub fn parse(&mut self, content: &str, content_type: &str) {
        let coordinator = ParseCoordinator::new(Arc::new(self.sink.clone()));
        self.parse_outcome = Some(coordinator.parse(content, content_type));
    }

    /// The last render outcome.
    pub fn render_outcome(&self) -> &RenderOutcome {
        self.render_outcome
            .as_ref()
            .unwrap_or_else(|| panic!("no template was rendered"))
    }
}
