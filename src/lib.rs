//! Agrifind library crate (used by the server binary and integration tests).
//!
//! Ranks marketplace crop listings against a buyer's free-text query by
//! blending four signals: semantic similarity, literal keyword containment,
//! price attractiveness, and buyer/seller geographic proximity.
//!
//! # Pipeline
//!
//! 1. [`search::SearchEngine`] resolves the buyer, composes the query text,
//!    and embeds it once per request via [`embedding::MiniLmEmbedder`].
//! 2. Each candidate from the [`store::DocumentStore`] scan is scored by
//!    [`scoring::CandidateScorer`] (weights in [`constants`]).
//! 3. [`ranking`] selects the top 10, either by full sort or by a
//!    bounded-memory streaming heap.
//!
//! The HTTP surface lives in [`gateway`]; process configuration in
//! [`config`].
//!
//! # Test/Mock Support
//!
//! A deterministic in-memory store and a stub embedder are available behind
//! `#[cfg(any(test, feature = "mock"))]` and [`embedding::MiniLmConfig::stub`].

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod ranking;
pub mod scoring;
pub mod search;
pub mod store;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_PAGE_SIZE, TOP_K, WEIGHT_CROP_MATCH, WEIGHT_LOCATION, WEIGHT_PRICE, WEIGHT_SIMILARITY,
};
pub use embedding::{
    EmbeddingError, EmbeddingModel, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig,
    MiniLmEmbedder, cosine_similarity,
};
pub use gateway::{HandlerState, create_router_with_state};
pub use ranking::{SelectionStrategy, TopK, rank_full};
pub use scoring::{CandidateScorer, ScoredListing};
pub use search::{QueryContext, SearchEngine, SearchError, SearchOptions};
#[cfg(any(test, feature = "mock"))]
pub use store::MockDocumentStore;
pub use store::{
    BuyerProfile, DocumentStore, FirestoreStore, ListingCandidate, ListingPage, Location,
    PageCursor, SellerProfile, StoreError,
};
