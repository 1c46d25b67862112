//! Recording engine used in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lsp_types::{
    CodeActionOrCommand, CompletionList, Diagnostic, DocumentHighlight, DocumentLink, Hover,
    LocationLink, Position, SemanticTokens, SemanticTokensLegend, SymbolInformation, Uri,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::document::DocumentSnapshot;
use crate::engine::{DefinitionTarget, DerefContext, EngineError, LanguageEngine};

/// Discriminates the kind of call recorded by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `do_validation`.
    Validation,
    /// `provide_document_highlights`.
    Highlights,
    /// `do_completion`.
    Completion,
    /// `do_hover`.
    Hover,
    /// `do_links`.
    Links,
    /// `do_find_document_symbols`.
    Symbols,
    /// `do_provide_definition`.
    Definition,
    /// `do_code_actions`.
    CodeActions,
    /// `compute_semantic_tokens`.
    SemanticTokens,
    /// `get_semantic_tokens_legend`.
    Legend,
    /// `do_deref`.
    Deref,
    /// `get_json_pointer_position`.
    JsonPointer,
    /// `refresh_context`.
    RefreshContext,
    /// `get_context`.
    GetContext,
    /// `render_template_through_service`.
    Render,
}

/// A call together with the inputs worth asserting on.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Which method ran.
    pub kind: CallKind,
    /// Snapshot handed to the engine, for document operations.
    pub document: Option<DocumentSnapshot>,
    /// Free-form detail such as the pointer, template or flags.
    pub detail: Option<String>,
}

/// Static responses returned by the engine.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    /// Diagnostics returned by validation.
    pub diagnostics: Vec<Diagnostic>,
    /// Hover returned for any position.
    pub hover: Option<Hover>,
    /// Rendered template text.
    pub rendered: String,
    /// Context returned by `get_context`.
    pub context: Value,
}

/// Test double that records every call routed through it.
#[derive(Clone)]
pub struct RecordingEngine {
    shared: Arc<Mutex<RecordingState>>,
}

impl RecordingEngine {
    /// Creates an engine returning `responses`.
    pub fn new(responses: ResponseSet) -> Self {
        Self {
            shared: Arc::new(Mutex::new(RecordingState {
                responses,
                calls: Vec::new(),
                failing: None,
            })),
        }
    }

    /// Creates an engine whose `kind` calls fail with `message`.
    pub fn failing(kind: CallKind, message: impl Into<String>) -> Self {
        let engine = Self::new(ResponseSet::default());
        with_state(&engine.shared, |state| {
            state.failing = Some((kind, message.into()));
        });
        engine
    }

    /// Returns a handle that can be used to assert recorded calls.
    pub fn handle(&self) -> RecordingEngineHandle {
        RecordingEngineHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    fn record<R>(
        &self,
        kind: CallKind,
        document: Option<&DocumentSnapshot>,
        detail: Option<String>,
        respond: impl FnOnce(&ResponseSet) -> R,
    ) -> Result<R, EngineError> {
        with_state(&self.shared, |state| {
            state.calls.push(RecordedCall {
                kind,
                document: document.cloned(),
                detail,
            });
            match &state.failing {
                Some((failing, message)) if *failing == kind => {
                    Err(EngineError::new(message.clone()))
                }
                _ => Ok(respond(&state.responses)),
            }
        })
    }
}

#[async_trait]
impl LanguageEngine for RecordingEngine {
    async fn do_validation(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<Vec<Diagnostic>, EngineError> {
        self.record(CallKind::Validation, Some(document), None, |responses| {
            responses.diagnostics.clone()
        })
    }

    async fn provide_document_highlights(
        &self,
        document: &DocumentSnapshot,
        _position: Position,
        token: CancellationToken,
    ) -> Result<Vec<DocumentHighlight>, EngineError> {
        let detail = format!("cancelled={}", token.is_cancelled());
        self.record(CallKind::Highlights, Some(document), Some(detail), |_| {
            vec![DocumentHighlight {
                range: lsp_types::Range::default(),
                kind: None,
            }]
        })
    }

    async fn do_completion(
        &self,
        document: &DocumentSnapshot,
        _position: Position,
    ) -> Result<CompletionList, EngineError> {
        self.record(CallKind::Completion, Some(document), None, |_| {
            CompletionList {
                is_incomplete: false,
                items: vec![lsp_types::CompletionItem::new_simple(
                    String::from("title"),
                    String::from("string"),
                )],
            }
        })
    }

    async fn do_hover(
        &self,
        document: &DocumentSnapshot,
        _position: Position,
    ) -> Result<Option<Hover>, EngineError> {
        self.record(CallKind::Hover, Some(document), None, |responses| {
            responses.hover.clone()
        })
    }

    async fn do_links(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<Vec<DocumentLink>, EngineError> {
        self.record(CallKind::Links, Some(document), None, |_| Vec::new())
    }

    async fn do_find_document_symbols(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<Vec<SymbolInformation>, EngineError> {
        self.record(CallKind::Symbols, Some(document), None, |_| Vec::new())
    }

    async fn do_provide_definition(
        &self,
        document: &DocumentSnapshot,
        target: DefinitionTarget,
    ) -> Result<Vec<LocationLink>, EngineError> {
        let detail = format!(
            "{}@{}:{}",
            target.uri.as_str(),
            target.position.line,
            target.position.character
        );
        self.record(CallKind::Definition, Some(document), Some(detail), |_| {
            Vec::new()
        })
    }

    async fn do_code_actions(
        &self,
        document: &DocumentSnapshot,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<CodeActionOrCommand>, EngineError> {
        let detail = format!("diagnostics={}", diagnostics.len());
        self.record(CallKind::CodeActions, Some(document), Some(detail), |_| {
            Vec::new()
        })
    }

    async fn compute_semantic_tokens(
        &self,
        document: &DocumentSnapshot,
    ) -> Result<SemanticTokens, EngineError> {
        self.record(CallKind::SemanticTokens, Some(document), None, |_| {
            SemanticTokens {
                result_id: Some(String::from("tokens-1")),
                data: Vec::new(),
            }
        })
    }

    async fn get_semantic_tokens_legend(&self) -> Result<SemanticTokensLegend, EngineError> {
        self.record(CallKind::Legend, None, None, |_| SemanticTokensLegend {
            token_types: vec![lsp_types::SemanticTokenType::KEYWORD],
            token_modifiers: Vec::new(),
        })
    }

    async fn do_deref(
        &self,
        document: &DocumentSnapshot,
        context: &DerefContext,
    ) -> Result<String, EngineError> {
        let detail = format!("format={:?}", context.format);
        self.record(CallKind::Deref, Some(document), Some(detail), |_| {
            String::from("{\"dereferenced\":true}")
        })
    }

    async fn get_json_pointer_position(
        &self,
        document: &DocumentSnapshot,
        pointer: &str,
    ) -> Result<Option<Position>, EngineError> {
        self.record(
            CallKind::JsonPointer,
            Some(document),
            Some(pointer.to_owned()),
            |_| Some(Position::new(2, 4)),
        )
    }

    async fn refresh_context(&self, uri: &Uri, context: Value) -> Result<Value, EngineError> {
        let detail = format!("{} {context}", uri.as_str());
        self.record(CallKind::RefreshContext, None, Some(detail), |_| context)
    }

    async fn get_context(&self, processed: bool) -> Result<Value, EngineError> {
        let detail = format!("processed={processed}");
        self.record(CallKind::GetContext, None, Some(detail), |responses| {
            responses.context.clone()
        })
    }

    async fn render_template_through_service(
        &self,
        template: &str,
    ) -> Result<String, EngineError> {
        self.record(CallKind::Render, None, Some(template.to_owned()), |responses| {
            responses.rendered.clone()
        })
    }
}

/// Handle that exposes recorded state for assertions.
#[derive(Clone)]
pub struct RecordingEngineHandle {
    shared: Arc<Mutex<RecordingState>>,
}

impl RecordingEngineHandle {
    /// Returns the ordered list of calls the engine observed.
    pub fn calls(&self) -> Vec<RecordedCall> {
        with_state(&self.shared, |state| state.calls.clone())
    }

    /// Returns only the call kinds, in order.
    pub fn kinds(&self) -> Vec<CallKind> {
        self.calls().into_iter().map(|call| call.kind).collect()
    }

    /// Returns the most recent call of `kind`.
    pub fn last(&self, kind: CallKind) -> Option<RecordedCall> {
        self.calls().into_iter().rev().find(|call| call.kind == kind)
    }
}

fn with_state<R, F>(shared: &Arc<Mutex<RecordingState>>, action: F) -> R
where
    F: FnOnce(&mut RecordingState) -> R,
{
    let mut guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
    action(&mut guard)
}

#[derive(Debug)]
struct RecordingState {
    responses: ResponseSet,
    calls: Vec<RecordedCall>,
    failing: Option<(CallKind, String)>,
}
