//! Cross-cutting, shared constants.
//!
//! The scoring weights are fixed product constants, not configuration; they
//! are defined once here and consumed by [`crate::scoring`]. Prefer deriving
//! secondary constants from primary ones to avoid drift.

/// Weight of the semantic similarity signal in the composite score.
pub const WEIGHT_SIMILARITY: f32 = 0.45;

/// Weight of the literal keyword-containment signal.
pub const WEIGHT_CROP_MATCH: f32 = 0.20;

/// Weight of the price-attractiveness signal.
pub const WEIGHT_PRICE: f32 = 0.15;

/// Weight of the buyer/seller proximity signal.
pub const WEIGHT_LOCATION: f32 = 0.20;

/// Number of ranked listings returned per request.
pub const TOP_K: usize = 10;

/// Default number of candidate documents fetched per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Price assumed when a listing document carries no `pricePerUnit`.
pub const DEFAULT_PRICE_PER_UNIT: f32 = 1.0;

/// Embedding dimension of the MiniLM sentence encoders.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the encoder per query.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;
