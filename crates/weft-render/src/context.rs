//! Render contexts supplied by the host.

use serde_json::{Map, Value};

use crate::errors::RenderError;

/// Data a template is rendered against.
///
/// Hosts hand over either the raw text of the context editor or an already
/// structured value. Text is parsed as JSON at render time; blank text is an
/// empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderContext {
    /// Raw JSON text.
    Text(String),
    /// Structured value used as-is.
    Structured(Value),
}

impl RenderContext {
    /// Resolves the context to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Context`] when text is not valid JSON.
    pub fn parse(&self) -> Result<Value, RenderError> {
        match self {
            Self::Text(text) if text.trim().is_empty() => Ok(Value::Object(Map::new())),
            Self::Text(text) => serde_json::from_str(text).map_err(RenderError::Context),
            Self::Structured(value) => Ok(value.clone()),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::Structured(Value::Object(Map::new()))
    }
}

impl From<&str> for RenderContext {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RenderContext {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RenderContext {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}
