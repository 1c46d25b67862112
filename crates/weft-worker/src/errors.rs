//! Error types surfaced by the worker facade and extension loader.

use std::fmt;

use thiserror::Error;

use crate::capability::CapabilityKind;
use crate::engine::EngineError;

/// Operation being executed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOperation {
    /// Engine construction.
    Initialise,
    /// Document validation.
    Validation,
    /// Document highlights.
    DocumentHighlights,
    /// Completion.
    Completion,
    /// Hover.
    Hover,
    /// Link collection.
    Links,
    /// Symbol collection.
    DocumentSymbols,
    /// Definition lookup.
    Definition,
    /// Code actions.
    CodeActions,
    /// Semantic tokens.
    SemanticTokens,
    /// Semantic tokens legend.
    SemanticTokensLegend,
    /// Dereference.
    Dereference,
    /// JSON pointer lookup.
    JsonPointerPosition,
    /// Context refresh.
    RefreshContext,
    /// Context retrieval.
    GetContext,
    /// Template rendering.
    RenderTemplate,
}

impl fmt::Display for WorkerOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initialise => "initialisation",
            Self::Validation => "validation",
            Self::DocumentHighlights => "document highlights",
            Self::Completion => "completion",
            Self::Hover => "hover",
            Self::Links => "links",
            Self::DocumentSymbols => "document symbols",
            Self::Definition => "definition",
            Self::CodeActions => "code actions",
            Self::SemanticTokens => "semantic tokens",
            Self::SemanticTokensLegend => "semantic tokens legend",
            Self::Dereference => "dereference",
            Self::JsonPointerPosition => "JSON pointer lookup",
            Self::RefreshContext => "context refresh",
            Self::GetContext => "context retrieval",
            Self::RenderTemplate => "template rendering",
        };
        formatter.write_str(label)
    }
}

/// Errors returned by [`crate::LanguageWorker`] implementations.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The engine reported a failure; the source is forwarded untouched.
    #[error("language engine failed during {operation}: {source}")]
    Engine {
        /// Operation that failed.
        operation: WorkerOperation,
        /// Underlying error.
        #[source]
        source: EngineError,
    },

    /// A requested extension could not be applied.
    #[error(transparent)]
    Extension(#[from] ExtensionError),
}

impl WorkerError {
    /// Wraps an engine failure.
    pub(crate) fn engine(operation: WorkerOperation, source: EngineError) -> Self {
        Self::Engine { operation, source }
    }

    /// Returns the operation when the error came from the engine.
    #[must_use]
    pub const fn operation(&self) -> Option<WorkerOperation> {
        match self {
            Self::Engine { operation, .. } => Some(*operation),
            Self::Extension(_) => None,
        }
    }
}

/// Errors raised while registering or applying worker extensions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// The creation parameters named an extension nobody registered.
    #[error("extension '{name}' was requested but no factory is registered under that name")]
    FactoryNotRegistered {
        /// Requested extension name.
        name: String,
    },

    /// The extension returned a worker that drops required capabilities.
    #[error(
        "extension '{name}' produced a worker missing required capabilities: {}",
        join_kinds(.missing)
    )]
    ContractViolation {
        /// Extension name.
        name: String,
        /// Capabilities the replacement no longer provides.
        missing: Vec<CapabilityKind>,
    },

    /// An extension with the same name is already registered.
    #[error("extension '{name}' is already registered")]
    Duplicate {
        /// Extension name.
        name: String,
    },

    /// Extension names must contain at least one visible character.
    #[error("extension names must not be blank")]
    BlankName,
}

fn join_kinds(kinds: &[CapabilityKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.key())
        .collect::<Vec<_>>()
        .join(", ")
}
