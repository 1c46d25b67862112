//! Worker-side language intelligence facade.
//!
//! The crate sits between a host editor and an analysis engine running in
//! another execution context. The host mirrors its edited buffers into a
//! [`BufferMirror`]; each [`LanguageWorker`] call resolves a fresh
//! [`DocumentSnapshot`] from that mirror and delegates to the
//! [`LanguageEngine`]. Documents the host has not mirrored produce empty
//! results rather than errors.
//!
//! Hosts may register extensions in an [`ExtensionRegistry`] to wrap or
//! replace the default [`WorkerFacade`] before any request is served; see
//! [`create_worker`].

#![deny(missing_docs)]

mod capability;
mod document;
mod engine;
mod errors;
mod extension;
mod facade;
pub mod telemetry;
mod worker;


pub use capability::{CapabilityKind, CapabilitySet};
pub use document::{
    BufferMirror, DocumentResolver, DocumentSnapshot, MirrorResolver, MirroredBuffer, SharedMirror,
};
pub use engine::{
    DefinitionTarget, DerefContext, DerefFormat, EngineError, EngineFactory, LanguageEngine,
};
pub use errors::{ExtensionError, WorkerError, WorkerOperation};
pub use extension::{
    ExtensionFactory, ExtensionLoader, ExtensionRegistry, ExtensionToolkit, create_worker,
};
pub use facade::WorkerFacade;
pub use worker::LanguageWorker;
