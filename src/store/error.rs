use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by document store operations.
pub enum StoreError {
    /// The HTTP request to the store could not be completed.
    #[error("store request to '{endpoint}' failed: {message}")]
    RequestFailed {
        /// Endpoint path or description.
        endpoint: String,
        /// Error message.
        message: String,
    },

    /// The store answered with a non-success status.
    #[error("store returned status {status} for '{endpoint}': {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Endpoint path or description.
        endpoint: String,
        /// Response body or error message.
        message: String,
    },

    /// A response body could not be parsed as JSON.
    #[error("failed to decode store response from '{endpoint}': {message}")]
    DecodeFailed {
        /// Endpoint path or description.
        endpoint: String,
        /// Error message.
        message: String,
    },

    /// A document is missing a required field or carries an unparseable value.
    ///
    /// This is a data-integrity failure and is fatal for the request that
    /// encountered it; candidates are never silently skipped.
    #[error("malformed document '{id}': {reason}")]
    MalformedDocument {
        /// Document id (or best-effort identifier).
        id: String,
        /// What was wrong.
        reason: String,
    },
}

impl StoreError {
    /// Returns `true` for failures caused by bad stored data rather than by
    /// reaching the store.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, StoreError::MalformedDocument { .. })
    }
}
