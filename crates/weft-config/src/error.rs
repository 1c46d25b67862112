use thiserror::Error;

/// Errors raised while reading worker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The host's creation parameters could not be decoded.
    #[error("invalid worker creation parameters: {0}")]
    InvalidCreateData(#[source] serde_json::Error),
}
