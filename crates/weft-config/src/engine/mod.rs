//! Closed schema for the analysis engine configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::defaults::{DEFAULT_MAX_COMPLETION_ITEMS, default_language_content};
use crate::logging::EngineLogLevel;
use crate::merge::{
    Combine, Merge, combine_leaf, combine_nested, combine_sequence, merge_json, merge_leaf,
    merge_nested, merge_sequence,
};

/// How the engine follows references while validating a document.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ReferenceValidationMode {
    /// Plain LSP-level validation, no reference resolution.
    Lsp,
    /// Resolve references inside the document only.
    Apidom,
    /// Resolve indirect references inside the document.
    ApidomIndirect,
    /// Resolve indirect references, following external documents.
    #[default]
    ApidomIndirectExternal,
}

/// An engine-side provider (validator or completion source) enabled by the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSpec {
    /// Identifier the engine uses to locate the provider.
    pub name: String,
    /// Provider-specific options, passed through untouched.
    #[serde(default)]
    pub options: Value,
}

impl ProviderSpec {
    /// Builds a provider spec without options.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }
}

/// Content metadata assumed for documents whose kind cannot be detected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageContent {
    /// Specification namespace, e.g. `handlebars`.
    pub namespace: String,
    /// Specification version.
    pub version: String,
    /// Serialisation format such as `TEXT` or `JSON`.
    pub format: String,
    /// Media type advertised for the content.
    pub media_type: String,
}

/// Partial [`LanguageContent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageContentOverrides {
    /// Replacement namespace.
    pub namespace: Option<String>,
    /// Replacement version.
    pub version: Option<String>,
    /// Replacement format.
    pub format: Option<String>,
    /// Replacement media type.
    pub media_type: Option<String>,
}

/// Completion tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionContext {
    /// Maximum number of items returned for one completion request.
    pub max_number_of_items: u32,
    /// Strict word filtering instead of the editor's fuzzy matching.
    #[serde(rename = "enableLSPFilter")]
    pub enable_lsp_filter: bool,
}

impl Default for CompletionContext {
    fn default() -> Self {
        Self {
            max_number_of_items: DEFAULT_MAX_COMPLETION_ITEMS,
            enable_lsp_filter: false,
        }
    }
}

/// Partial [`CompletionContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletionContextOverrides {
    /// Replacement item limit.
    pub max_number_of_items: Option<u32>,
    /// Replacement filter flag.
    #[serde(rename = "enableLSPFilter")]
    pub enable_lsp_filter: Option<bool>,
}

/// Validation tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    /// Reference resolution strategy.
    pub reference_validation_mode: ReferenceValidationMode,
}

/// Partial [`ValidationContext`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationContextOverrides {
    /// Replacement reference resolution strategy.
    pub reference_validation_mode: Option<ReferenceValidationMode>,
}

/// Fully resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Validators enabled on top of the engine's built-in rules.
    pub validator_providers: Vec<ProviderSpec>,
    /// Completion sources enabled on top of the built-in ones.
    pub completion_providers: Vec<ProviderSpec>,
    /// Emit timing information for each engine call.
    pub performance_logs: bool,
    /// Engine log verbosity.
    pub log_level: EngineLogLevel,
    /// Fallback content metadata.
    pub default_language_content: LanguageContent,
    /// Completion tuning.
    pub completion_context: CompletionContext,
    /// Validation tuning.
    pub validation_context: ValidationContext,
    /// Engine options outside the closed schema.
    pub extensions: Map<String, Value>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validator_providers: Vec::new(),
            completion_providers: Vec::new(),
            performance_logs: false,
            log_level: EngineLogLevel::Debug,
            default_language_content: default_language_content(),
            completion_context: CompletionContext::default(),
            validation_context: ValidationContext::default(),
            extensions: Map::new(),
        }
    }
}

/// Partial [`EngineConfig`] as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfigOverrides {
    /// Validator providers, merged by index.
    pub validator_providers: Option<Vec<ProviderSpec>>,
    /// Completion providers, merged by index.
    pub completion_providers: Option<Vec<ProviderSpec>>,
    /// Replacement performance logging flag.
    pub performance_logs: Option<bool>,
    /// Replacement log level.
    pub log_level: Option<EngineLogLevel>,
    /// Partial content metadata.
    pub default_language_content: Option<LanguageContentOverrides>,
    /// Partial completion tuning.
    pub completion_context: Option<CompletionContextOverrides>,
    /// Partial validation tuning.
    pub validation_context: Option<ValidationContextOverrides>,
    /// Open-ended options, deep-merged with [`merge_json`].
    pub extensions: Option<Map<String, Value>>,
}

impl Merge for LanguageContent {
    type Overrides = LanguageContentOverrides;

    fn merge(&self, overrides: &Self::Overrides) -> Self {
        Self {
            namespace: merge_leaf(&self.namespace, overrides.namespace.as_ref()),
            version: merge_leaf(&self.version, overrides.version.as_ref()),
            format: merge_leaf(&self.format, overrides.format.as_ref()),
            media_type: merge_leaf(&self.media_type, overrides.media_type.as_ref()),
        }
    }
}

impl Merge for CompletionContext {
    type Overrides = CompletionContextOverrides;

    fn merge(&self, overrides: &Self::Overrides) -> Self {
        Self {
            max_number_of_items: merge_leaf(
                &self.max_number_of_items,
                overrides.max_number_of_items.as_ref(),
            ),
            enable_lsp_filter: merge_leaf(
                &self.enable_lsp_filter,
                overrides.enable_lsp_filter.as_ref(),
            ),
        }
    }
}

impl Merge for ValidationContext {
    type Overrides = ValidationContextOverrides;

    fn merge(&self, overrides: &Self::Overrides) -> Self {
        Self {
            reference_validation_mode: merge_leaf(
                &self.reference_validation_mode,
                overrides.reference_validation_mode.as_ref(),
            ),
        }
    }
}

impl Merge for EngineConfig {
    type Overrides = EngineConfigOverrides;

    fn merge(&self, overrides: &Self::Overrides) -> Self {
        Self {
            validator_providers: merge_sequence(
                &self.validator_providers,
                overrides.validator_providers.as_ref(),
            ),
            completion_providers: merge_sequence(
                &self.completion_providers,
                overrides.completion_providers.as_ref(),
            ),
            performance_logs: merge_leaf(
                &self.performance_logs,
                overrides.performance_logs.as_ref(),
            ),
            log_level: merge_leaf(&self.log_level, overrides.log_level.as_ref()),
            default_language_content: merge_nested(
                &self.default_language_content,
                overrides.default_language_content.as_ref(),
            ),
            completion_context: merge_nested(
                &self.completion_context,
                overrides.completion_context.as_ref(),
            ),
            validation_context: merge_nested(
                &self.validation_context,
                overrides.validation_context.as_ref(),
            ),
            extensions: merge_extensions(&self.extensions, overrides.extensions.as_ref()),
        }
    }
}

impl Combine for LanguageContentOverrides {
    fn combine(&self, later: &Self) -> Self {
        Self {
            namespace: combine_leaf(self.namespace.as_ref(), later.namespace.as_ref()),
            version: combine_leaf(self.version.as_ref(), later.version.as_ref()),
            format: combine_leaf(self.format.as_ref(), later.format.as_ref()),
            media_type: combine_leaf(self.media_type.as_ref(), later.media_type.as_ref()),
        }
    }
}

impl Combine for CompletionContextOverrides {
    fn combine(&self, later: &Self) -> Self {
        Self {
            max_number_of_items: combine_leaf(
                self.max_number_of_items.as_ref(),
                later.max_number_of_items.as_ref(),
            ),
            enable_lsp_filter: combine_leaf(
                self.enable_lsp_filter.as_ref(),
                later.enable_lsp_filter.as_ref(),
            ),
        }
    }
}

impl Combine for ValidationContextOverrides {
    fn combine(&self, later: &Self) -> Self {
        Self {
            reference_validation_mode: combine_leaf(
                self.reference_validation_mode.as_ref(),
                later.reference_validation_mode.as_ref(),
            ),
        }
    }
}

impl Combine for EngineConfigOverrides {
    fn combine(&self, later: &Self) -> Self {
        Self {
            validator_providers: combine_sequence(
                self.validator_providers.as_ref(),
                later.validator_providers.as_ref(),
            ),
            completion_providers: combine_sequence(
                self.completion_providers.as_ref(),
                later.completion_providers.as_ref(),
            ),
            performance_logs: combine_leaf(
                self.performance_logs.as_ref(),
                later.performance_logs.as_ref(),
            ),
            log_level: combine_leaf(self.log_level.as_ref(), later.log_level.as_ref()),
            default_language_content: combine_nested(
                self.default_language_content.as_ref(),
                later.default_language_content.as_ref(),
            ),
            completion_context: combine_nested(
                self.completion_context.as_ref(),
                later.completion_context.as_ref(),
            ),
            validation_context: combine_nested(
                self.validation_context.as_ref(),
                later.validation_context.as_ref(),
            ),
            extensions: match (self.extensions.as_ref(), later.extensions.as_ref()) {
                (Some(first), Some(second)) => Some(merge_extensions(first, Some(second))),
                (first, second) => second.or(first).cloned(),
            },
        }
    }
}

fn merge_extensions(
    base: &Map<String, Value>,
    overrides: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let Some(patch) = overrides else {
        return base.clone();
    };
    match merge_json(&Value::Object(base.clone()), &Value::Object(patch.clone())) {
        Value::Object(merged) => merged,
        _ => base.clone(),
    }
}
