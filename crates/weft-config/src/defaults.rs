use crate::engine::LanguageContent;
use crate::logging::LogFormat;

/// Default log filter expression used when the host does not supply one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Upper bound on completion items returned by the engine.
pub const DEFAULT_MAX_COMPLETION_ITEMS: u32 = 100;

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the worker.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Content metadata assumed for documents the engine cannot classify.
#[must_use]
pub fn default_language_content() -> LanguageContent {
    LanguageContent {
        namespace: String::from("handlebars"),
        version: String::from("1.0"),
        format: String::from("TEXT"),
        media_type: String::from("application/vnd.aai.handlebars;version=1.0"),
    }
}
