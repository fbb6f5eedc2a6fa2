//! Error types for the answer client.
//!
//! Validation failures never leave the process; transport failures are what
//! the answering service (or the network in between) hands back. Neither is
//! fatal: the caller can always submit again.

use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a question")]
    EmptyQuery,
}

/// A request that was dispatched but produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("request timed out{}", after_secs(.0))]
    Timeout(Option<u64>),
    #[error("request cancelled")]
    Cancelled,
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Classify a reqwest failure. Decode errors come from reading the JSON
    /// body; everything else happened on the wire.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: Option<u64>) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout(timeout_secs);
        }
        if err.is_decode() {
            return TransportError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return TransportError::Status {
                status: status.as_u16(),
            };
        }
        TransportError::Network(err.to_string())
    }
}

fn after_secs(secs: &Option<u64>) -> String {
    secs.map(|s| format!(" after {}s", s)).unwrap_or_default()
}

/// Why [`AnswerClient::submit`](crate::client::AnswerClient::submit) did not
/// dispatch a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a question is already being answered")]
    Busy,
}
