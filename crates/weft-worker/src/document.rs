//! Document snapshots resolved from the host's mirrored buffers.
//!
//! The host owns a live collection of mirrored buffers and may change it at
//! any time. Every worker call therefore resolves a fresh
//! [`DocumentSnapshot`]; nothing is cached between calls.

use std::sync::{Arc, RwLock};

use lsp_types::Uri;

/// Immutable view of a document at the moment it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    uri: Uri,
    language_id: String,
    version: i32,
    text: String,
}

impl DocumentSnapshot {
    /// Builds a snapshot.
    #[must_use]
    pub fn new(
        uri: Uri,
        language_id: impl Into<String>,
        version: i32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
            version,
            text: text.into(),
        }
    }

    /// Document identifier.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Language kind the worker was created for.
    #[must_use]
    pub fn language_id(&self) -> &str {
        self.language_id.as_str()
    }

    /// Buffer version at resolution time.
    #[must_use]
    pub const fn version(&self) -> i32 {
        self.version
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// Host-owned, versioned copy of an edited document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredBuffer {
    /// Document identifier.
    pub uri: Uri,
    /// Version counter maintained by the host.
    pub version: i32,
    /// Current buffer contents.
    pub current_text: String,
}

impl MirroredBuffer {
    /// Builds a mirrored buffer.
    #[must_use]
    pub fn new(uri: Uri, version: i32, current_text: impl Into<String>) -> Self {
        Self {
            uri,
            version,
            current_text: current_text.into(),
        }
    }
}

/// Read access to the host's mirrored buffer collection.
pub trait BufferMirror: Send + Sync {
    /// Returns the buffers currently mirrored by the host.
    fn mirrored_buffers(&self) -> Vec<MirroredBuffer>;
}

/// Produces document snapshots on demand.
pub trait DocumentResolver: Send + Sync {
    /// Resolves `uri` against the current buffer state.
    fn resolve(&self, uri: &Uri) -> Option<DocumentSnapshot>;
}

/// Resolver that scans a [`BufferMirror`] for an exact URI match.
pub struct MirrorResolver {
    mirror: Arc<dyn BufferMirror>,
    language_id: String,
}

impl MirrorResolver {
    /// Builds a resolver stamping `language_id` on every snapshot.
    #[must_use]
    pub fn new(mirror: Arc<dyn BufferMirror>, language_id: impl Into<String>) -> Self {
        Self {
            mirror,
            language_id: language_id.into(),
        }
    }
}

impl DocumentResolver for MirrorResolver {
    fn resolve(&self, uri: &Uri) -> Option<DocumentSnapshot> {
        self.mirror
            .mirrored_buffers()
            .into_iter()
            .find(|buffer| buffer.uri.as_str() == uri.as_str())
            .map(|buffer| {
                DocumentSnapshot::new(
                    uri.clone(),
                    self.language_id.clone(),
                    buffer.version,
                    buffer.current_text,
                )
            })
    }
}

/// In-process [`BufferMirror`] for hosts embedding the worker directly.
///
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct SharedMirror {
    buffers: Arc<RwLock<Vec<MirroredBuffer>>>,
}

impl SharedMirror {
    /// Creates an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a buffer or replaces the one with the same URI.
    pub fn upsert(&self, buffer: MirroredBuffer) {
        let mut buffers = self
            .buffers
            .write()
            .unwrap_or_else(|poison| poison.into_inner());
        match buffers
            .iter_mut()
            .find(|existing| existing.uri.as_str() == buffer.uri.as_str())
        {
            Some(existing) => *existing = buffer,
            None => buffers.push(buffer),
        }
    }

    /// Removes the buffer for `uri`, returning it when present.
    pub fn remove(&self, uri: &Uri) -> Option<MirroredBuffer> {
        let mut buffers = self
            .buffers
            .write()
            .unwrap_or_else(|poison| poison.into_inner());
        let index = buffers
            .iter()
            .position(|buffer| buffer.uri.as_str() == uri.as_str())?;
        Some(buffers.remove(index))
    }
}

impl BufferMirror for SharedMirror {
    fn mirrored_buffers(&self) -> Vec<MirroredBuffer> {
        self.buffers
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}
