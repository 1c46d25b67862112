//! Delegating worker used to exercise extensions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

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
use crate::worker::LanguageWorker;

/// Wraps another worker, tagging rendered output and counting renders.
pub struct CountingWorker {
    inner: Box<dyn LanguageWorker>,
    tag: String,
    declared: CapabilitySet,
    renders: Arc<AtomicUsize>,
}

impl CountingWorker {
    /// Wraps `inner`, prefixing rendered text with `tag`.
    pub fn wrap(inner: Box<dyn LanguageWorker>, tag: impl Into<String>) -> Self {
        let declared = inner.capabilities();
        Self {
            inner,
            tag: tag.into(),
            declared,
            renders: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Overrides the declared capabilities.
    #[must_use]
    pub fn declaring(mut self, declared: CapabilitySet) -> Self {
        self.declared = declared;
        self
    }

    /// Shares the render counter with the caller.
    #[must_use]
    pub fn counting_into(mut self, renders: Arc<AtomicUsize>) -> Self {
        self.renders = renders;
        self
    }
}

#[async_trait]
impl LanguageWorker for CountingWorker {
    fn capabilities(&self) -> CapabilitySet {
        self.declared.clone()
    }

    async fn do_validation(&self, uri: &Uri) -> Result<Vec<Diagnostic>, WorkerError> {
        self.inner.do_validation(uri).await
    }

    async fn do_provide_document_highlights(
        &self,
        uri: &Uri,
        position: Position,
        token: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, WorkerError> {
        self.inner
            .do_provide_document_highlights(uri, position, token)
            .await
    }

    async fn do_complete(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<CompletionList, WorkerError> {
        self.inner.do_complete(uri, position).await
    }

    async fn do_hover(&self, uri: &Uri, position: Position) -> Result<Option<Hover>, WorkerError> {
        self.inner.do_hover(uri, position).await
    }

    async fn do_links(&self, uri: &Uri) -> Result<Vec<DocumentLink>, WorkerError> {
        self.inner.do_links(uri).await
    }

    async fn find_document_symbols(
        &self,
        uri: &Uri,
    ) -> Result<Vec<SymbolInformation>, WorkerError> {
        self.inner.find_document_symbols(uri).await
    }

    async fn provide_definition(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<LocationLink>, WorkerError> {
        self.inner.provide_definition(uri, position).await
    }

    async fn do_code_actions(
        &self,
        uri: &Uri,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, WorkerError> {
        self.inner.do_code_actions(uri, diagnostics).await
    }

    async fn find_semantic_tokens(&self, uri: &Uri) -> Result<SemanticTokens, WorkerError> {
        self.inner.find_semantic_tokens(uri).await
    }

    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, WorkerError> {
        self.inner.get_semantic_tokens_legend().await
    }

    async fn do_deref(&self, uri: &Uri, context: &DerefContext) -> Result<String, WorkerError> {
        self.inner.do_deref(uri, context).await
    }

    async fn get_json_pointer_position(
        &self,
        uri: &Uri,
        pointer: &str,
    ) -> Result<Option<Position>, WorkerError> {
        self.inner.get_json_pointer_position(uri, pointer).await
    }

    async fn refresh_context(&self, uri: &Uri, context: Value) -> Result<Value, WorkerError> {
        self.inner.refresh_context(uri, context).await
    }

    async fn get_context(&self, processed: bool) -> Result<Value, WorkerError> {
        self.inner.get_context(processed).await
    }

    async fn render_template(&self, template: &str) -> Result<String, WorkerError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let rendered = self.inner.render_template(template).await?;
        Ok(format!("{}{rendered}", self.tag))
    }
}
