//! The capability surface the host talks to.

use std::fmt;

use async_trait::async_trait;
use lsp_types::{
    CodeActionOrCommand, CompletionList, Diagnostic, DocumentHighlight, DocumentLink, Hover,
    LocationLink, Position, SemanticTokens, SemanticTokensLegend, SymbolInformation, Uri,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::capability::CapabilitySet;
use crate::engine::DerefContext;
use crate::errors::WorkerError;

/// Document-oriented language operations exposed to the host.
///
/// [`crate::WorkerFacade`] is the default implementation. Extensions
/// registered with [`crate::ExtensionRegistry`] may wrap or replace it, as
/// long as the replacement still declares [`CapabilitySet::required`].
///
/// Read-only operations return an empty value when `uri` has no mirrored
/// buffer. Engine failures surface as [`WorkerError::Engine`].
#[async_trait]
pub trait LanguageWorker: Send + Sync {
    /// Capabilities this worker provides.
    fn capabilities(&self) -> CapabilitySet;

    /// Validates the document.
    async fn do_validation(&self, uri: &Uri) -> Result<Vec<Diagnostic>, WorkerError>;

    /// Highlights occurrences of the symbol at `position`.
    async fn do_provide_document_highlights(
        &self,
        uri: &Uri,
        position: Position,
        token: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, WorkerError>;

    /// Completes at `position`.
    async fn do_complete(&self, uri: &Uri, position: Position)
    -> Result<CompletionList, WorkerError>;

    /// Hover content at `position`.
    async fn do_hover(&self, uri: &Uri, position: Position) -> Result<Option<Hover>, WorkerError>;

    /// Links embedded in the document.
    async fn do_links(&self, uri: &Uri) -> Result<Vec<DocumentLink>, WorkerError>;

    /// Symbols declared in the document.
    async fn find_document_symbols(
        &self,
        uri: &Uri,
    ) -> Result<Vec<SymbolInformation>, WorkerError>;

    /// Definition of the symbol at `position`.
    async fn provide_definition(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<LocationLink>, WorkerError>;

    /// Code actions addressing `diagnostics`.
    async fn do_code_actions(
        &self,
        uri: &Uri,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, WorkerError>;

    /// Semantic tokens for the whole document.
    async fn find_semantic_tokens(&self, uri: &Uri) -> Result<SemanticTokens, WorkerError>;

    /// Legend for decoding semantic tokens.
    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, WorkerError>;

    /// Dereferenced document text.
    async fn do_deref(&self, uri: &Uri, context: &DerefContext) -> Result<String, WorkerError>;

    /// Position addressed by a JSON pointer.
    async fn get_json_pointer_position(
        &self,
        uri: &Uri,
        pointer: &str,
    ) -> Result<Option<Position>, WorkerError>;

    /// Replaces the engine's processing context for `uri`.
    async fn refresh_context(&self, uri: &Uri, context: Value) -> Result<Value, WorkerError>;

    /// Current processing context, processed or raw.
    async fn get_context(&self, processed: bool) -> Result<Value, WorkerError>;

    /// Renders `template` through the engine.
    async fn render_template(&self, template: &str) -> Result<String, WorkerError>;
}

impl fmt::Debug for dyn LanguageWorker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LanguageWorker")
    }
}
