//! Selection between worker-backed and in-process rendering.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lsp_types::Uri;
use weft_worker::LanguageWorker;

use crate::errors::HostAccessError;

/// Host accessor for the editor whose model is being previewed.
#[async_trait]
pub trait ActiveEditor: Send + Sync {
    /// Identifier of the active editor's model.
    ///
    /// # Errors
    ///
    /// Returns a [`HostAccessError`] when no model is available.
    async fn model_uri(&self) -> Result<Uri, HostAccessError>;
}

/// Host accessor returning the language worker bound to a model.
#[async_trait]
pub trait WorkerProvider: Send + Sync {
    /// Worker serving `uri`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostAccessError`] when the worker cannot be obtained.
    async fn worker_for(&self, uri: &Uri) -> Result<Arc<dyn LanguageWorker>, HostAccessError>;
}

/// Where templates are rendered.
#[derive(Clone)]
pub enum RenderMode {
    /// Through the language worker bound to the active editor's model.
    Remote {
        /// Active editor accessor.
        editor: Arc<dyn ActiveEditor>,
        /// Worker accessor.
        workers: Arc<dyn WorkerProvider>,
    },
    /// In process, with Handlebars.
    Local,
}

impl RenderMode {
    /// Chooses [`RenderMode::Remote`] only when both accessors are present.
    #[must_use]
    pub fn detect(
        editor: Option<Arc<dyn ActiveEditor>>,
        workers: Option<Arc<dyn WorkerProvider>>,
    ) -> Self {
        match (editor, workers) {
            (Some(editor), Some(workers)) => Self::Remote { editor, workers },
            _ => Self::Local,
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Remote { .. } => "remote",
            Self::Local => "local",
        }
    }

    /// Returns `true` for [`RenderMode::Remote`].
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

impl fmt::Debug for RenderMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
