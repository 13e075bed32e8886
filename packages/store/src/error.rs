use thiserror::Error;

/// Errors from one store operation. The engine never retries; retry policy
/// belongs to the transport layer behind the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("store returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The call could not complete at the transport level.
    #[error("network failure: {0}")]
    Network(String),

    /// The call did not complete within the configured timeout.
    #[error("store request timed out")]
    Timeout,

    /// The store answered with a body the client could not interpret.
    #[error("unexpected store response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Network(error.to_string())
        }
    }
}
