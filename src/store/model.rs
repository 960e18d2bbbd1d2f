use serde::Serialize;

/// A postal-ish location as stored on user profiles.
///
/// Legacy profiles store `location` as a single opaque string; those decode
/// to an address with empty city/province.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub province: String,
}

impl Location {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            province: province.into(),
        }
    }

    /// Legacy single-string shape: everything lands in `address`.
    pub fn from_legacy_string(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// A buyer profile, fetched once per request by uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerProfile {
    pub uid: String,
    pub location: Location,
}

/// A seller profile, fetched per candidate that names one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerProfile {
    pub seller_id: String,
    pub location: Option<Location>,
}

/// One candidate listing from the `embeddings` collection.
///
/// Transient: exists only while its request is being scored.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCandidate {
    pub listing_id: Option<String>,
    pub crop_name: String,
    /// Defaults to 1.0 when the document carries no price.
    pub price_per_unit: f32,
    pub embedding: Vec<f32>,
    pub seller_id: Option<String>,
}

/// Opaque pagination cursor owned by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(pub String);

/// One page of the candidate scan.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    pub candidates: Vec<ListingCandidate>,
    /// `None` when the scan is exhausted.
    pub next: Option<PageCursor>,
}
