use super::*;
use crate::constants::DEFAULT_PRICE_PER_UNIT;
use crate::store::{ListingCandidate, Location};

fn candidate(crop: &str, price: f32, embedding: Vec<f32>) -> ListingCandidate {
    ListingCandidate {
        listing_id: Some(format!("{crop}-{price}")),
        crop_name: crop.to_string(),
        price_per_unit: price,
        embedding,
        seller_id: None,
    }
}

#[test]
fn crop_match_is_case_insensitive_substring() {
    assert_eq!(crop_match("rice", "Rice"), 1.0);
    assert_eq!(crop_match("rice", "Brown Rice"), 1.0);
    assert_eq!(crop_match("RICE", "organic rice seeds"), 1.0);
    assert_eq!(crop_match("rice", "Corn"), 0.0);
    // Empty keyword trivially matches; validation keeps it out of the pipeline.
    assert_eq!(crop_match("", "Corn"), 1.0);
}

#[test]
fn price_score_decreases_with_price() {
    assert!((price_score(0.0) - 1.0).abs() < 1e-6);
    assert!(price_score(50.0) > price_score(200.0));
    // Default price of 1 scores 1/1.01.
    assert!((price_score(DEFAULT_PRICE_PER_UNIT) - 1.0 / 1.01).abs() < 1e-6);
}

#[test]
fn location_score_covers_all_branches() {
    let buyer_city = "quezon city";
    let buyer_province = "metro manila";

    let same_city = Location::new("", "Quezon City", "Metro Manila");
    assert_eq!(location_score(&same_city, buyer_city, buyer_province), 1.0);

    let same_province = Location::new("", "Makati", "METRO MANILA");
    assert_eq!(location_score(&same_province, buyer_city, buyer_province), 0.7);

    let elsewhere = Location::new("", "Cebu", "Cebu");
    assert_eq!(location_score(&elsewhere, buyer_city, buyer_province), 0.0);
}

#[test]
fn empty_seller_location_never_matches_empty_buyer_location() {
    // A seller without a recorded location must not score as a perfect
    // proximity match just because the buyer's fields are empty too.
    let unresolved = Location::default();
    assert_eq!(location_score(&unresolved, "", ""), 0.0);
}

#[test]
fn composite_uses_fixed_weights() {
    let total = composite_score(0.8, 1.0, 0.5, 0.7);
    let expected = 0.45 * 0.8 + 0.20 * 1.0 + 0.15 * 0.5 + 0.20 * 0.7;
    assert!((total - expected).abs() < 1e-6);
}

#[test]
fn scorer_reproduces_reference_scenario() {
    // Buyer in Quezon City, Metro Manila, searching "rice". Candidate (a) is
    // closer and cheaper, candidate (b) semantically closer but remote and
    // expensive; (a) must outrank (b).
    let query = vec![1.0, 0.0];
    let scorer = CandidateScorer::new(query, "rice", "Quezon City", "Metro Manila");

    // Embeddings picked so cosine similarity is exactly 0.8 and 0.9.
    let emb_a = vec![0.8, 0.6];
    let emb_b = vec![0.9, (1.0f32 - 0.81).sqrt()];

    let a = scorer.score(
        &candidate("Rice", 50.0, emb_a),
        Location::new("", "Quezon City", "Metro Manila"),
    );
    let b = scorer.score(
        &candidate("Brown Rice", 200.0, emb_b),
        Location::new("", "Cebu", "Cebu"),
    );

    assert!((a.similarity - 0.8).abs() < 1e-5);
    assert!((b.similarity - 0.9).abs() < 1e-5);

    // total(a) = 0.45*0.8 + 0.20*1.0 + 0.15*(1/1.5) + 0.20*1.0 = 0.86
    assert!((a.total_score - 0.86).abs() < 1e-5);
    // total(b) = 0.45*0.9 + 0.20*1.0 + 0.15*(1/3) + 0.20*0.0 = 0.655
    assert!((b.total_score - 0.655).abs() < 1e-5);

    assert!(a.total_score > b.total_score);
}

#[test]
fn scored_listing_carries_candidate_fields_through() {
    let scorer = CandidateScorer::new(vec![1.0, 0.0], "corn", "cebu", "cebu");
    let c = candidate("Corn", 120.0, vec![0.0, 1.0]);
    let location = Location::new("5 Main St", "Cebu", "Cebu");

    let scored = scorer.score(&c, location.clone());

    assert_eq!(scored.listing_id, c.listing_id);
    assert_eq!(scored.crop_name, "Corn");
    assert_eq!(scored.price, 120.0);
    assert_eq!(scored.location, location);
    assert_eq!(scored.location_score, 1.0);
}
