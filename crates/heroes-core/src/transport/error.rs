//! Transport failure type.

use super::Method;

/// Any failure of the HTTP layer. Callers treat every variant the same way;
/// the variants only exist to produce a useful message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// libcurl reported an error (connect, resolve, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: u32,
    },
    /// Request or response body was not the expected JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The blocking worker running the request panicked or was cancelled.
    #[error("transport task failed: {0}")]
    Task(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u32> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
