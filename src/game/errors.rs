use thiserror::Error;

/// Errors that can arise while fetching a creature for a new round.
///
/// Every variant is absorbed by the session: the round start is abandoned and
/// whatever is on screen stays there.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u32),

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("api returned status {0}")]
    Status(u16),

    /// The body was not the JSON document we expected.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Returned when a guess is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid number: {input:?}")]
pub struct ValidationError {
    pub input: String,
}
