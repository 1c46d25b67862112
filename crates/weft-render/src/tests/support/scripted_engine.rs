//! Engine whose render answer is scripted by the test.

use async_trait::async_trait;
use lsp_types::{
    CodeActionOrCommand, CompletionList, Diagnostic, DocumentHighlight, DocumentLink, Hover,
    LocationLink, Position, SemanticTokens, SemanticTokensLegend, SymbolInformation, Uri,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use weft_worker::{DefinitionTarget, DerefContext, DocumentSnapshot, EngineError, LanguageEngine};

/// Answers every render with a fixed text or error; everything else is empty.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    answer: Result<String, String>,
}

impl ScriptedEngine {
    /// Renders every template as `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            answer: Ok(text.into()),
        }
    }

    /// Fails every render with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: Err(message.into()),
        }
    }
}

#[async_trait]
impl LanguageEngine for ScriptedEngine {
    async fn do_validation(&self, _: &DocumentSnapshot) -> Result<Vec<Diagnostic>, EngineError> {
        Ok(Vec::new())
    }

    async fn provide_document_highlights(
        &self,
        _: &DocumentSnapshot,
        _: Position,
        _: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, EngineError> {
        Ok(Vec::new())
    }

    async fn do_completion(
        &self,
        _: &DocumentSnapshot,
        _: Position,
    ) -> Result<CompletionList, EngineError> {
        Ok(CompletionList::default())
    }

    async fn do_hover(
        &self,
        _: &DocumentSnapshot,
        _: Position,
    ) -> Result<Option<Hover>, EngineError> {
        Ok(None)
    }

    async fn do_links(&self, _: &DocumentSnapshot) -> Result<Vec<DocumentLink>, EngineError> {
        Ok(Vec::new())
    }

    async fn do_find_document_symbols(
        &self,
        _: &DocumentSnapshot,
    ) -> Result<Vec<SymbolInformation>, EngineError> {
        Ok(Vec::new())
    }

    async fn do_provide_definition(
        &self,
        _: &DocumentSnapshot,
        _: DefinitionTarget,
    ) -> Result<Vec<LocationLink>, EngineError> {
        Ok(Vec::new())
    }

    async fn do_code_actions(
        &self,
        _: &DocumentSnapshot,
        _: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, EngineError> {
        Ok(Vec::new())
    }

    async fn compute_semantic_tokens(
        &self,
        _: &DocumentSnapshot,
    ) -> Result<SemanticTokens, EngineError> {
        Ok(SemanticTokens::default())
    }

    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, EngineError> {
        Ok(SemanticTokensLegend::default())
    }

    async fn do_deref(
        &self,
        _: &DocumentSnapshot,
        _: &DerefContext,
    ) -> Result<String, EngineError> {
        Ok(String::new())
    }

    async fn get_json_pointer_position(
        &self,
        _: &DocumentSnapshot,
        _: &str,
    ) -> Result<Option<Position>, EngineError> {
        Ok(None)
    }

    async fn refresh_context(&self, _: &Uri, context: Value) -> Result<Value, EngineError> {
        Ok(context)
    }

    async fn get_context(&self, _: bool) -> Result<Value, EngineError> {
        Ok(Value::Null)
    }

    async fn render_template_through_service(&self, _: &str) -> Result<String, EngineError> {
        self.answer.clone().map_err(EngineError::new)
    }
}
