//! Read-only document store access.
//!
//! The ranking pipeline needs three reads from the marketplace database:
//! a buyer profile by uid, a seller profile by id, and a cursor-paginated
//! scan of the `embeddings` collection holding the listing candidates.
//! [`FirestoreStore`] talks to the Firestore REST API; a deterministic
//! in-memory [`MockDocumentStore`] backs tests.

pub mod error;
pub mod firestore;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use error::StoreError;
pub use firestore::FirestoreStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockDocumentStore;
pub use model::{
    BuyerProfile, ListingCandidate, ListingPage, Location, PageCursor, SellerProfile,
};

/// Collection holding user (buyer and seller) profiles.
pub const USERS_COLLECTION: &str = "users";

/// Collection holding listing candidates with precomputed embeddings.
pub const LISTINGS_COLLECTION: &str = "embeddings";

/// Minimal async read interface used by the search pipeline.
///
/// All operations are reads; the store may be slow or paginated but is never
/// mutated by this service.
pub trait DocumentStore: Send + Sync {
    /// Looks up a buyer profile by its unique `uid` field.
    ///
    /// Returns `Ok(None)` when no profile matches.
    fn fetch_buyer(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<Option<BuyerProfile>, StoreError>> + Send;

    /// Looks up a seller profile by document id.
    ///
    /// Returns `Ok(None)` when the document does not exist.
    fn fetch_seller(
        &self,
        seller_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<SellerProfile>, StoreError>> + Send;

    /// Fetches one page of the candidate scan.
    ///
    /// `cursor` is the value returned by the previous page (`None` starts the
    /// scan). An exhausted scan yields an empty page with `next = None`.
    fn fetch_listings_page(
        &self,
        page_size: usize,
        cursor: Option<PageCursor>,
    ) -> impl std::future::Future<Output = Result<ListingPage, StoreError>> + Send;
}
