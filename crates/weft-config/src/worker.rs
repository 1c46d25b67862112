//! Creation parameters supplied by the host when it instantiates a worker.

use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::EngineConfigOverrides;
use crate::error::ConfigError;
use crate::logging::LogSettings;

/// Parameters the host passes when creating a language worker.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCreateData {
    /// Language identifier stamped on every document snapshot.
    pub language_id: String,
    /// Partial engine configuration layered over the defaults.
    #[serde(default)]
    pub engine_config: EngineConfigOverrides,
    /// Names of registered extensions that should wrap the default worker.
    ///
    /// Accepts a single string or an array of strings.
    #[serde(default, deserialize_with = "one_or_many")]
    pub custom_worker_extensions: Vec<String>,
    /// Logging settings for the worker process.
    #[serde(default)]
    pub log: LogSettings,
}

impl WorkerCreateData {
    /// Builds creation parameters for a language with default settings.
    #[must_use]
    pub fn for_language(language_id: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            ..Self::default()
        }
    }

    /// Parses creation parameters from the host's JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCreateData`] when the payload does not
    /// match the expected shape.
    pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(ConfigError::InvalidCreateData)
    }

    /// Returns `true` when the host asked for at least one extension.
    #[must_use]
    pub fn requests_extensions(&self) -> bool {
        !self.custom_worker_extensions.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
        None => Vec::new(),
    })
}
