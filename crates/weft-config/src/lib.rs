//! Configuration shared by the weft language worker crates.
//!
//! The worker is instantiated by a host editor with a bag of creation
//! parameters ([`WorkerCreateData`]). Those parameters carry a partial engine
//! configuration ([`EngineConfigOverrides`]) which is merged once, at
//! construction time, onto the built-in [`EngineConfig`] defaults. Merging is
//! structural: nested mappings merge per key, sequences merge per index, and
//! absent override keys never clobber a default.

mod defaults;
mod engine;
mod error;
mod logging;
mod merge;
mod worker;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_COMPLETION_ITEMS, default_language_content,
    default_log_filter_string, default_log_format,
};
pub use engine::{
    CompletionContext, CompletionContextOverrides, EngineConfig, EngineConfigOverrides,
    LanguageContent, LanguageContentOverrides, ProviderSpec, ReferenceValidationMode,
    ValidationContext, ValidationContextOverrides,
};
pub use error::ConfigError;
pub use logging::{EngineLogLevel, LogFormat, LogFormatParseError, LogSettings};
pub use merge::{Combine, Merge, merge_json};
pub use worker::WorkerCreateData;
