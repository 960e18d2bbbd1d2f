//! Sentence embedding for query representation.
//!
//! [`MiniLmEmbedder`] wraps a candle BERT encoder with mean pooling and L2
//! normalization, matching the sentence-transformers MiniLM family. Use
//! [`MiniLmConfig::stub`] for tests/examples without model files.

/// BERT encoder wrapper.
pub mod bert;
/// Embedder configuration and model identifiers.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Cosine similarity primitive.
pub mod similarity;

#[cfg(test)]
mod tests;

pub use config::{EmbeddingModel, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig};
pub use error::EmbeddingError;
pub use similarity::cosine_similarity;

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;

enum EmbedderBackend {
    Model {
        encoder: Arc<BertEncoder>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding generator for query text (supports stub mode).
pub struct MiniLmEmbedder {
    backend: EmbedderBackend,
    config: MiniLmConfig,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("model", &self.config.model.identifier())
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl MiniLmEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: MiniLmConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("MiniLM embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for MiniLM");

        if !config.model_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(
            |e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        let encoder = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        info!(
            model_dir = %config.model_dir.display(),
            model = config.model.identifier(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "MiniLM encoder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder: Arc::new(encoder),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Generates a normalized embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => self.embed_stub(text),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &Arc<BertEncoder>,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        if tokens.len() > self.config.max_seq_len {
            tokens.truncate(self.config.max_seq_len);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = Tensor::new(&tokens[..], device)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Failed to create input tensor: {}", e),
            })?
            .unsqueeze(0)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Failed to unsqueeze input: {}", e),
            })?;

        let token_type_ids =
            input_ids
                .zeros_like()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Failed to create token type ids: {}", e),
                })?;

        // Single unpadded sequence: every token attends, so mean pooling is a
        // plain mean over the sequence dimension.
        let hidden_states = encoder
            .forward(&input_ids, &token_type_ids, None)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let pooled = hidden_states
            .mean(1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| encoder.to_f32(t))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Mean pooling failed: {}", e),
            })?;

        let mut embedding =
            pooled
                .to_vec1::<f32>()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Failed to convert embedding to vec: {}", e),
                })?;

        embedding.truncate(self.config.embedding_dim);
        Ok(normalize(embedding))
    }

    fn embed_stub(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        Ok(normalize(embedding))
    }

    /// Returns the configured output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }
}

fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
