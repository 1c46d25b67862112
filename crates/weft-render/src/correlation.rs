//! Correlation identifiers linking the events of one request.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Number of characters in a generated [`RequestId`].
pub const REQUEST_ID_LENGTH: usize = 10;

/// Short alphanumeric token shared by every event of one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh identifier from the thread-local generator.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates an identifier from `rng`.
    #[must_use]
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token = rng
            .sample_iter(&Alphanumeric)
            .take(REQUEST_ID_LENGTH)
            .map(char::from)
            .collect();
        Self(token)
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
