//! Default worker that resolves documents and delegates to the engine.

use std::sync::Arc;

use async_trait::async_trait;
use lsp_types::{
    CodeActionOrCommand, CompletionList, Diagnostic, DocumentHighlight, DocumentLink, Hover,
    LocationLink, Position, SemanticTokens, SemanticTokensLegend, SymbolInformation, Uri,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use weft_config::{EngineConfig, Merge, WorkerCreateData};

use crate::capability::CapabilitySet;
use crate::document::{BufferMirror, DocumentResolver, DocumentSnapshot, MirrorResolver};
use crate::engine::{DefinitionTarget, DerefContext, EngineError, EngineFactory, LanguageEngine};
use crate::errors::{WorkerError, WorkerOperation};
use crate::worker::LanguageWorker;

/// Thin delegation layer between the host and one configured engine.
///
/// Every document operation resolves a fresh snapshot first and returns the
/// empty value of its result type when the document is not mirrored. Engine
/// failures are forwarded as-is; there is no retry here.
#[derive(Clone)]
pub struct WorkerFacade {
    resolver: Arc<dyn DocumentResolver>,
    engine: Arc<dyn LanguageEngine>,
    config: EngineConfig,
}

impl WorkerFacade {
    /// Builds a facade for the host's creation parameters.
    ///
    /// The engine configuration is merged onto the defaults exactly once,
    /// here, and handed to `factory`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Engine`] when the factory rejects the merged
    /// configuration.
    pub fn create(
        mirror: Arc<dyn BufferMirror>,
        create_data: &WorkerCreateData,
        factory: &dyn EngineFactory,
    ) -> Result<Self, WorkerError> {
        let config = EngineConfig::default().merge(&create_data.engine_config);
        let engine = factory
            .create_engine(&config)
            .map_err(|source| WorkerError::engine(WorkerOperation::Initialise, source))?;
        let resolver = Arc::new(MirrorResolver::new(mirror, create_data.language_id.clone()));
        debug!(
            language_id = create_data.language_id.as_str(),
            "language worker created"
        );
        Ok(Self::from_parts(resolver, engine, config))
    }

    /// Assembles a facade from already-built collaborators.
    #[must_use]
    pub const fn from_parts(
        resolver: Arc<dyn DocumentResolver>,
        engine: Arc<dyn LanguageEngine>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver,
            engine,
            config,
        }
    }

    /// The merged configuration the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine this facade delegates to.
    #[must_use]
    pub fn engine(&self) -> Arc<dyn LanguageEngine> {
        Arc::clone(&self.engine)
    }

    /// The resolver used for every document operation.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn DocumentResolver> {
        Arc::clone(&self.resolver)
    }

    fn document(&self, uri: &Uri, operation: WorkerOperation) -> Option<DocumentSnapshot> {
        let document = self.resolver.resolve(uri);
        if document.is_none() {
            debug!(
                uri = uri.as_str(),
                %operation,
                "document is not mirrored; returning an empty result"
            );
        }
        document
    }
}

fn delegate_error(operation: WorkerOperation) -> impl FnOnce(EngineError) -> WorkerError {
    move |source| WorkerError::engine(operation, source)
}

#[async_trait]
impl LanguageWorker for WorkerFacade {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    async fn do_validation(&self, uri: &Uri) -> Result<Vec<Diagnostic>, WorkerError> {
        let operation = WorkerOperation::Validation;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        self.engine
            .do_validation(&document)
            .await
            .map_err(delegate_error(operation))
    }

    async fn do_provide_document_highlights(
        &self,
        uri: &Uri,
        position: Position,
        token: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, WorkerError> {
        let operation = WorkerOperation::DocumentHighlights;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        self.engine
            .provide_document_highlights(&document, position, token)
            .await
            .map_err(delegate_error(operation))
    }

    async fn do_complete(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<CompletionList, WorkerError> {
        let operation = WorkerOperation::Completion;
        let Some(document) = self.document(uri, operation) else {
            return Ok(CompletionList::default());
        };
        self.engine
            .do_completion(&document, position)
            .await
            .map_err(delegate_error(operation))
    }

    async fn do_hover(&self, uri: &Uri, position: Position) -> Result<Option<Hover>, WorkerError> {
        let operation = WorkerOperation::Hover;
        let Some(document) = self.document(uri, operation) else {
            return Ok(None);
        };
        self.engine
            .do_hover(&document, position)
            .await
            .map_err(delegate_error(operation))
    }

    async fn do_links(&self, uri: &Uri) -> Result<Vec<DocumentLink>, WorkerError> {
        let operation = WorkerOperation::Links;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        self.engine
            .do_links(&document)
            .await
            .map_err(delegate_error(operation))
    }

    async fn find_document_symbols(
        &self,
        uri: &Uri,
    ) -> Result<Vec<SymbolInformation>, WorkerError> {
        let operation = WorkerOperation::DocumentSymbols;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        self.engine
            .do_find_document_symbols(&document)
            .await
            .map_err(delegate_error(operation))
    }

    async fn provide_definition(
        &self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<LocationLink>, WorkerError> {
        let operation = WorkerOperation::Definition;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        let target = DefinitionTarget {
            uri: uri.clone(),
            position,
        };
        self.engine
            .do_provide_definition(&document, target)
            .await
            .map_err(delegate_error(operation))
    }

    async fn do_code_actions(
        &self,
        uri: &Uri,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, WorkerError> {
        let operation = WorkerOperation::CodeActions;
        let Some(document) = self.document(uri, operation) else {
            return Ok(Vec::new());
        };
        self.engine
            .do_code_actions(&document, diagnostics)
            .await
            .map_err(delegate_error(operation))
    }

    async fn find_semantic_tokens(&self, uri: &Uri) -> Result<SemanticTokens, WorkerError> {
        let operation = WorkerOperation::SemanticTokens;
        let Some(document) = self.document(uri, operation) else {
            return Ok(SemanticTokens::default());
        };
        self.engine
            .compute_semantic_tokens(&document)
            .await
            .map_err(delegate_error(operation))
    }

    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, WorkerError> {
        self.engine
            .get_semantic_tokens_legend()
            .await
            .map_err(delegate_error(WorkerOperation::SemanticTokensLegend))
    }

    async fn do_deref(&self, uri: &Uri, context: &DerefContext) -> Result<String, WorkerError> {
        let operation = WorkerOperation::Dereference;
        let Some(document) = self.document(uri, operation) else {
            return Ok(String::new());
        };
        self.engine
            .do_deref(&document, context)
            .await
            .map_err(delegate_error(operation))
    }

    async fn get_json_pointer_position(
        &self,
        uri: &Uri,
        pointer: &str,
    ) -> Result<Option<Position>, WorkerError> {
        let operation = WorkerOperation::JsonPointerPosition;
        let Some(document) = self.document(uri, operation) else {
            return Ok(None);
        };
        self.engine
            .get_json_pointer_position(&document, pointer)
            .await
            .map_err(delegate_error(operation))
    }

    async fn refresh_context(&self, uri: &Uri, context: Value) -> Result<Value, WorkerError> {
        self.engine
            .refresh_context(uri, context)
            .await
            .map_err(delegate_error(WorkerOperation::RefreshContext))
    }

    async fn get_context(&self, processed: bool) -> Result<Value, WorkerError> {
        self.engine
            .get_context(processed)
            .await
            .map_err(delegate_error(WorkerOperation::GetContext))
    }

    async fn render_template(&self, template: &str) -> Result<String, WorkerError> {
        self.engine
            .render_template_through_service(template)
            .await
            .map_err(delegate_error(WorkerOperation::RenderTemplate))
    }
}
