//! In-process Handlebars rendering used when no language worker is reachable.

use handlebars::{Handlebars, Template};
use serde_json::Value;

use crate::errors::RenderError;

const INLINE_TEMPLATE: &str = "inline";

/// Compiles `source` without rendering it.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] when the template is malformed.
pub fn compile(source: &str) -> Result<Template, RenderError> {
    Template::compile(source).map_err(RenderError::Compile)
}

/// Compiles `source` and renders it against `context`.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] for malformed templates and
/// [`RenderError::Render`] when rendering fails.
pub fn render(source: &str, context: &Value) -> Result<String, RenderError> {
    render_compiled(compile(source)?, context)
}

/// Renders an already compiled `template` against `context`.
///
/// # Errors
///
/// Returns [`RenderError::Render`] when rendering fails.
pub fn render_compiled(template: Template, context: &Value) -> Result<String, RenderError> {
    let mut registry = Handlebars::new();
    registry.register_template(INLINE_TEMPLATE, template);
    registry
        .render(INLINE_TEMPLATE, context)
        .map_err(RenderError::Render)
}
