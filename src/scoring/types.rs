use crate::store::Location;

#[derive(Debug, Clone, PartialEq)]
/// One candidate after scoring, carrying the fields surfaced to the caller.
///
/// `total_score` is fixed at construction as the weighted combination of the
/// four sub-scores and is never mutated afterwards.
pub struct ScoredListing {
    /// Listing id as stored (absent on some legacy documents).
    pub listing_id: Option<String>,
    /// Crop name as stored.
    pub crop_name: String,
    /// Price per unit used for scoring (after the missing-price default).
    pub price: f32,
    /// Seller location, empty fields when unresolved.
    pub location: Location,
    /// Cosine similarity between query and listing embedding.
    pub similarity: f32,
    /// Proximity sub-score: one of {0.0, 0.7, 1.0}.
    pub location_score: f32,
    /// Weighted composite score.
    pub total_score: f32,
}
