//! Contract for the external analysis engine the worker delegates to.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lsp_types::{
    CodeActionOrCommand, CompletionList, Diagnostic, DocumentHighlight, DocumentLink, Hover,
    LocationLink, Position, SemanticTokens, SemanticTokensLegend, SymbolInformation, Uri,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use weft_config::EngineConfig;

use crate::document::DocumentSnapshot;

/// Errors reported by engine implementations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl EngineError {
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

    /// Human-friendly description without the optional source.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Output flavour requested from a dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DerefFormat {
    /// Serialise the dereferenced document as JSON.
    Json,
    /// Serialise the dereferenced document as YAML.
    Yaml,
}

/// Options for [`LanguageEngine::do_deref`]. The default is the empty context.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DerefContext {
    /// Output format; the engine picks one when absent.
    pub format: Option<DerefFormat>,
    /// Base URI used to resolve relative references.
    #[serde(rename = "baseURI")]
    pub base_uri: Option<String>,
    /// Engine-specific options.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Location a definition lookup starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTarget {
    /// Document the cursor is in.
    pub uri: Uri,
    /// Cursor position.
    pub position: Position,
}

/// Behaviour required from the analysis engine.
///
/// Implementations own their error semantics: the worker forwards every
/// [`EngineError`] to its caller untouched.
#[async_trait]
pub trait LanguageEngine: Send + Sync {
    /// Computes diagnostics for the document.
    async fn do_validation(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<Vec<Diagnostic>, EngineError>;

    /// Computes highlights for the symbol under `position`.
    ///
    /// The engine is responsible for honouring `token`.
    async fn provide_document_highlights(
        &self,
        document: &DocumentSnapshot,
        position: Position,
        token: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, EngineError>;

    /// Computes completion items at `position`.
    async fn do_completion(
        &self,
        document: &DocumentSnapshot,
        position: Position,
    ) -> Result<CompletionList, EngineError>;

    /// Computes hover content at `position`.
    async fn do_hover(
        &self,
        document: &DocumentSnapshot,
        position: Position,
    ) -> Result<Option<Hover>, EngineError>;

    /// Collects links embedded in the document.
    async fn do_links(&self, document: &DocumentSnapshot)
    -> Result<Vec<DocumentLink>, EngineError>;

    /// Collects the document's symbols.
    async fn do_find_document_symbols(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<Vec<SymbolInformation>, EngineError>;

    /// Resolves the definition of the symbol at `target`.
    async fn do_provide_definition(
        &self,
        document: &DocumentSnapshot,
        target: DefinitionTarget,
    ) -> Result<Vec<LocationLink>, EngineError>;

    /// Computes code actions for the supplied diagnostics.
    async fn do_code_actions(
        &self,
        document: &DocumentSnapshot,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, EngineError>;

    /// Computes semantic tokens for the whole document.
    async fn compute_semantic_tokens(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<SemanticTokens, EngineError>;

    /// Returns the legend used to decode semantic tokens.
    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, EngineError>;

    /// Dereferences the document and returns its serialised form.
    async fn do_deref(
        &self,
        document: &DocumentSnapshot,
        context: &DerefContext,
    ) -> Result<String, EngineError>;

    /// Maps a JSON pointer to a position in the document.
    async fn get_json_pointer_position(
        &self,
        document: &DocumentSnapshot,
        pointer: &str,
    ) -> Result<Option<Position>, EngineError>;

    /// Replaces the engine's processing context for `uri`.
    async fn refresh_context(&self, uri: &Uri, context: Value) -> Result<Value, EngineError>;

    /// Returns the current processing context, processed or raw.
    async fn get_context(&self, processed: bool) -> Result<Value, EngineError>;

    /// Renders a template with the engine's own context.
    ///
    /// Failures may be reported in-band as text starting with
    /// `ERROR RENDERING:`.
    async fn render_template_through_service(&self, template: &str)
    -> Result<String, EngineError>;
}

impl fmt::Debug for dyn LanguageEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LanguageEngine")
    }
}

/// Builds configured engine instances.
pub trait EngineFactory: Send + Sync {
    /// Creates an engine from a fully merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] when the engine rejects the configuration.
    fn create_engine(&self, config: &EngineConfig) -> Result<Arc<dyn LanguageEngine>, EngineError>;
}

impl<F> EngineFactory for F
where
    F: Fn(&EngineConfig) -> Result<Arc<dyn LanguageEngine>, EngineError> + Send + Sync,
{
    fn create_engine(&self, config: &EngineConfig) -> Result<Arc<dyn LanguageEngine>, EngineError> {
        self(config)
    }
}
