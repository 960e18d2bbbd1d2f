//! Hybrid candidate scoring.
//!
//! Each candidate gets four independent sub-scores, combined with fixed
//! weights from [`crate::constants`]:
//!
//! | signal | formula | range |
//! |---|---|---|
//! | similarity | cosine(query, candidate embedding) | [-1, 1], ~[0, 1] for normalized encoders |
//! | crop_match | lowercased keyword contained in lowercased crop name | {0, 1} |
//! | price_score | `1 / (1 + price/100)` | (0, 1] |
//! | location_score | same city 1.0, same province 0.7, else 0.0 | {0, 0.7, 1.0} |
//!
//! City/province comparisons are case-insensitive and require a non-empty
//! seller value: a seller with no recorded location scores 0.0 even when the
//! buyer's fields are empty too.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::ScoredListing;

use crate::constants::{WEIGHT_CROP_MATCH, WEIGHT_LOCATION, WEIGHT_PRICE, WEIGHT_SIMILARITY};
use crate::embedding::cosine_similarity;
use crate::store::{ListingCandidate, Location};

/// 1.0 when the lowercased keyword occurs in the lowercased crop name.
///
/// An empty keyword trivially matches; the request validator rejects empty
/// keywords before scoring is ever reached.
pub fn crop_match(keyword: &str, crop_name: &str) -> f32 {
    if crop_name.to_lowercase().contains(&keyword.to_lowercase()) {
        1.0
    } else {
        0.0
    }
}

/// Price attractiveness: monotonically decreasing, 1/(1 + price/100).
pub fn price_score(price_per_unit: f32) -> f32 {
    1.0 / (1.0 + price_per_unit / 100.0)
}

/// Proximity sub-score between a seller location and the (pre-lowercased)
/// buyer city/province.
pub fn location_score(seller: &Location, buyer_city: &str, buyer_province: &str) -> f32 {
    let seller_city = seller.city.to_lowercase();
    if !seller_city.is_empty() && seller_city == buyer_city {
        return 1.0;
    }

    let seller_province = seller.province.to_lowercase();
    if !seller_province.is_empty() && seller_province == buyer_province {
        return 0.7;
    }

    0.0
}

/// The fixed affine combination of the four sub-scores.
pub fn composite_score(similarity: f32, crop_match: f32, price_score: f32, location: f32) -> f32 {
    WEIGHT_SIMILARITY * similarity
        + WEIGHT_CROP_MATCH * crop_match
        + WEIGHT_PRICE * price_score
        + WEIGHT_LOCATION * location
}

/// Scores candidates against one request's query representation.
///
/// Constructed once per request from the query vector and buyer location;
/// [`score`](CandidateScorer::score) itself is pure, the seller location is
/// resolved by the pipeline before the call.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    query_vector: Vec<f32>,
    keyword: String,
    buyer_city: String,
    buyer_province: String,
}

impl CandidateScorer {
    /// `buyer_city`/`buyer_province` are lowercased here once, not per candidate.
    pub fn new(query_vector: Vec<f32>, keyword: &str, buyer_city: &str, buyer_province: &str) -> Self {
        Self {
            query_vector,
            keyword: keyword.to_string(),
            buyer_city: buyer_city.to_lowercase(),
            buyer_province: buyer_province.to_lowercase(),
        }
    }

    /// Produces the [`ScoredListing`] for one candidate.
    pub fn score(&self, candidate: &ListingCandidate, seller_location: Location) -> ScoredListing {
        let similarity = cosine_similarity(&self.query_vector, &candidate.embedding);
        let crop = crop_match(&self.keyword, &candidate.crop_name);
        let price = price_score(candidate.price_per_unit);
        let location = location_score(&seller_location, &self.buyer_city, &self.buyer_province);

        ScoredListing {
            listing_id: candidate.listing_id.clone(),
            crop_name: candidate.crop_name.clone(),
            price: candidate.price_per_unit,
            location: seller_location,
            similarity,
            location_score: location,
            total_score: composite_score(similarity, crop, price, location),
        }
    }
}
