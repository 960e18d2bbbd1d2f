use serde::{Deserialize, Serialize};

use crate::scoring::ScoredListing;
use crate::store::Location;

/// Body of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub uid: String,
}

/// Successful search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "rankedListings")]
    pub ranked_listings: Vec<RankedListing>,
}

/// Wire shape of one ranked listing.
///
/// Field spelling (camelCase ids, snake_case scores) is preserved from the
/// upstream consumers of the original service.
#[derive(Debug, Clone, Serialize)]
pub struct RankedListing {
    #[serde(rename = "listingId")]
    pub listing_id: Option<String>,
    #[serde(rename = "cropName")]
    pub crop_name: String,
    pub price: f32,
    pub location: Location,
    pub similarity: f32,
    pub location_score: f32,
    pub total_score: f32,
}

impl From<ScoredListing> for RankedListing {
    fn from(scored: ScoredListing) -> Self {
        Self {
            listing_id: scored.listing_id,
            crop_name: scored.crop_name,
            price: scored.price,
            location: scored.location,
            similarity: scored.similarity,
            location_score: scored.location_score,
            total_score: scored.total_score,
        }
    }
}
