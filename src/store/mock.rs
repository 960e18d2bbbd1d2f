use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::StoreError;
use super::model::{
    BuyerProfile, ListingCandidate, ListingPage, Location, PageCursor, SellerProfile,
};
use super::DocumentStore;

/// Deterministic in-memory store for tests and examples.
///
/// Pagination cursors are plain offsets into the listing vector, encoded as
/// strings; real stores own their cursor format and callers must not assume
/// one.
#[derive(Default, Clone)]
pub struct MockDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    buyers: HashMap<String, BuyerProfile>,
    sellers: HashMap<String, SellerProfile>,
    listings: Vec<ListingCandidate>,
    inject_error: Option<StoreError>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_buyer(&self, uid: &str, location: Location) {
        self.inner.write().buyers.insert(
            uid.to_string(),
            BuyerProfile {
                uid: uid.to_string(),
                location,
            },
        );
    }

    pub fn insert_seller(&self, seller_id: &str, location: Option<Location>) {
        self.inner.write().sellers.insert(
            seller_id.to_string(),
            SellerProfile {
                seller_id: seller_id.to_string(),
                location,
            },
        );
    }

    pub fn insert_listing(&self, candidate: ListingCandidate) {
        self.inner.write().listings.push(candidate);
    }

    pub fn listing_count(&self) -> usize {
        self.inner.read().listings.len()
    }

    /// Makes the next listings-page fetch fail with `error`.
    pub fn inject_listings_error(&self, error: StoreError) {
        self.inner.write().inject_error = Some(error);
    }
}

impl DocumentStore for MockDocumentStore {
    async fn fetch_buyer(&self, uid: &str) -> Result<Option<BuyerProfile>, StoreError> {
        Ok(self.inner.read().buyers.get(uid).cloned())
    }

    async fn fetch_seller(&self, seller_id: &str) -> Result<Option<SellerProfile>, StoreError> {
        Ok(self.inner.read().sellers.get(seller_id).cloned())
    }

    async fn fetch_listings_page(
        &self,
        page_size: usize,
        cursor: Option<PageCursor>,
    ) -> Result<ListingPage, StoreError> {
        let mut inner = self.inner.write();

        if let Some(error) = inner.inject_error.take() {
            return Err(error);
        }

        let offset = match cursor {
            Some(PageCursor(token)) => {
                token
                    .parse::<usize>()
                    .map_err(|_| StoreError::DecodeFailed {
                        endpoint: "mock listings".to_string(),
                        message: format!("bad cursor '{token}'"),
                    })?
            }
            None => 0,
        };

        let end = offset.saturating_add(page_size).min(inner.listings.len());
        let candidates = inner.listings[offset.min(end)..end].to_vec();

        let next = if end < inner.listings.len() {
            Some(PageCursor(end.to_string()))
        } else {
            None
        };

        Ok(ListingPage { candidates, next })
    }
}
