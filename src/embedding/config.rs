use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default MiniLM embedding dimension.
pub const MINILM_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default MiniLM max sequence length.
pub const MINILM_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Sentence encoders recognized by deployments of this service.
///
/// The deployments historically differed in which paraphrase encoder they
/// shipped; the identifier is an explicit configuration value rather than a
/// hardcoded model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingModel {
    /// `paraphrase-MiniLM-L6-v2` (6-layer encoder).
    #[default]
    ParaphraseMiniLmL6V2,
    /// `paraphrase-MiniLM-L3-v2` (3-layer encoder, faster, slightly weaker).
    ParaphraseMiniLmL3V2,
}

impl EmbeddingModel {
    /// Parses a model identifier (case-insensitive). Returns `None` when the
    /// identifier is not a recognized deployment option.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paraphrase-minilm-l6-v2" => Some(Self::ParaphraseMiniLmL6V2),
            "paraphrase-minilm-l3-v2" => Some(Self::ParaphraseMiniLmL3V2),
            _ => None,
        }
    }

    /// Canonical identifier for logging and config round-trips.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::ParaphraseMiniLmL6V2 => "paraphrase-minilm-l6-v2",
            Self::ParaphraseMiniLmL3V2 => "paraphrase-minilm-l3-v2",
        }
    }

    /// Output dimension of the encoder. Both MiniLM variants emit 384 floats.
    pub fn embedding_dim(&self) -> usize {
        MINILM_EMBEDDING_DIM
    }
}

#[derive(Debug, Clone)]
/// Configuration for [`MiniLmEmbedder`](super::MiniLmEmbedder).
pub struct MiniLmConfig {
    /// Directory holding `model.safetensors`, `config.json` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Which encoder variant the directory holds.
    pub model: EmbeddingModel,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for MiniLmConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            model: EmbeddingModel::default(),
            max_seq_len: MINILM_MAX_SEQ_LEN,
            embedding_dim: MINILM_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl MiniLmConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P, model: EmbeddingModel) -> Self {
        Self {
            model_dir: model_dir.into(),
            model,
            embedding_dim: model.embedding_dim(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Path to the safetensors weights file.
    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join("model.safetensors")
    }

    /// Path to the encoder `config.json`.
    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }

    /// Path to `tokenizer.json`.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }

    /// Returns `true` when all required model files are present.
    pub fn model_available(&self) -> bool {
        self.weights_path().is_file()
            && self.config_path().is_file()
            && self.tokenizer_path().is_file()
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be non-zero".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
