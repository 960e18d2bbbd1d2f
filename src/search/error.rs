use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::store::StoreError;

/// Request-fatal failures of the search pipeline.
///
/// Every kind is unrecovered: no retries, no partial results. The
/// [`code`](SearchError::code) string is the machine-readable taxonomy
/// surfaced to callers.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Missing or empty request field, rejected before any I/O.
    #[error("missing or empty '{field}' in request")]
    InvalidQuery { field: &'static str },

    /// No buyer profile matches the uid.
    #[error("no buyer found with uid: {uid}")]
    BuyerNotFound { uid: String },

    /// The embedding model failed to encode the query.
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The document store failed or returned malformed data.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SearchError {
    /// Stable machine-readable error code for the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery { .. } => "invalid_query",
            SearchError::BuyerNotFound { .. } => "buyer_not_found",
            SearchError::Embedding(_) => "embedding_error",
            SearchError::Store(e) if e.is_data_integrity() => "data_integrity",
            SearchError::Store(_) => "upstream_error",
        }
    }
}
