//! Capability modelling for worker contracts.

use std::collections::BTreeSet;
use std::fmt;

/// Feature exposed through a language worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// Document validation.
    Validation,
    /// Highlights for the symbol under the cursor.
    DocumentHighlights,
    /// Completion items.
    Completion,
    /// Hover content.
    Hover,
    /// Embedded links.
    Links,
    /// Document symbols.
    DocumentSymbols,
    /// Definition lookup.
    Definition,
    /// Code actions for diagnostics.
    CodeActions,
    /// Semantic tokens and their legend.
    SemanticTokens,
    /// Dereferencing with context.
    Dereference,
    /// JSON pointer to position lookup.
    JsonPointer,
    /// Context refresh and retrieval.
    Context,
    /// Template rendering through the engine.
    RenderTemplate,
}

impl CapabilityKind {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Validation,
        Self::DocumentHighlights,
        Self::Completion,
        Self::Hover,
        Self::Links,
        Self::DocumentSymbols,
        Self::Definition,
        Self::CodeActions,
        Self::SemanticTokens,
        Self::Dereference,
        Self::JsonPointer,
        Self::Context,
        Self::RenderTemplate,
    ];

    /// Returns the stable key used in logs and error messages.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DocumentHighlights => "document-highlights",
            Self::Completion => "completion",
            Self::Hover => "hover",
            Self::Links => "links",
            Self::DocumentSymbols => "document-symbols",
            Self::Definition => "definition",
            Self::CodeActions => "code-actions",
            Self::SemanticTokens => "semantic-tokens",
            Self::Dereference => "dereference",
            Self::JsonPointer => "json-pointer",
            Self::Context => "context",
            Self::RenderTemplate => "render-template",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

/// Set of capabilities a worker declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    kinds: BTreeSet<CapabilityKind>,
}

impl CapabilitySet {
    /// Every capability.
    #[must_use]
    pub fn full() -> Self {
        Self::from_kinds(CapabilityKind::ALL)
    }

    /// Capabilities every worker replacement must keep.
    #[must_use]
    pub fn required() -> Self {
        Self::full()
    }

    /// Builds a set from the supplied kinds.
    #[must_use]
    pub fn from_kinds(kinds: impl IntoIterator<Item = CapabilityKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Returns a copy without `kind`.
    #[must_use]
    pub fn without(mut self, kind: CapabilityKind) -> Self {
        self.kinds.remove(&kind);
        self
    }

    /// Kinds in `required` that this set lacks, in declaration order.
    #[must_use]
    pub fn missing_from(&self, required: &Self) -> Vec<CapabilityKind> {
        required.kinds.difference(&self.kinds).copied().collect()
    }

    /// Iterates over the declared capabilities.
    pub fn iter(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.kinds.iter().copied()
    }
}
