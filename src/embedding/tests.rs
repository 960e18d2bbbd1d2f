use super::*;

fn stub_embedder() -> MiniLmEmbedder {
    MiniLmEmbedder::load(MiniLmConfig::stub()).unwrap()
}

#[test]
fn stub_embeddings_are_deterministic() {
    let embedder = stub_embedder();

    let a = embedder.embed("rice quezon city metro manila").unwrap();
    let b = embedder.embed("rice quezon city metro manila").unwrap();

    assert_eq!(a, b);
    assert_eq!(a.len(), MINILM_EMBEDDING_DIM);
}

#[test]
fn stub_embeddings_differ_for_different_text() {
    let embedder = stub_embedder();

    let a = embedder.embed("rice").unwrap();
    let b = embedder.embed("corn").unwrap();

    assert_ne!(a, b);
}

#[test]
fn stub_embeddings_are_unit_norm() {
    let embedder = stub_embedder();

    let v = embedder.embed("banana").unwrap();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();

    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn cosine_similarity_of_identical_vectors_is_one() {
    let v = vec![0.3, -0.5, 0.8, 0.1];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn cosine_similarity_of_orthogonal_vectors_is_zero() {
    let a = vec![1.0, 0.0];
    let b = vec![0.0, 1.0];
    assert_eq!(cosine_similarity(&a, &b), 0.0);
}

#[test]
fn cosine_similarity_of_opposite_vectors_is_minus_one() {
    let a = vec![1.0, 2.0];
    let b = vec![-1.0, -2.0];
    assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
}

#[test]
fn cosine_similarity_handles_zero_and_mismatched_vectors() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
}

#[test]
fn embedding_model_identifiers_round_trip() {
    for model in [
        EmbeddingModel::ParaphraseMiniLmL6V2,
        EmbeddingModel::ParaphraseMiniLmL3V2,
    ] {
        assert_eq!(EmbeddingModel::parse(model.identifier()), Some(model));
    }
    assert_eq!(EmbeddingModel::parse("word2vec"), None);
}

#[test]
fn missing_model_dir_is_rejected() {
    let config = MiniLmConfig::new("/nonexistent/minilm", EmbeddingModel::ParaphraseMiniLmL6V2);
    let result = MiniLmEmbedder::load(config);
    assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
}
