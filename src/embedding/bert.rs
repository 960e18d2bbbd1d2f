use candle_core::{DType, Device, Result, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use std::path::Path;

/// Thin wrapper around the candle BERT encoder used by the MiniLM embedder.
///
/// Loads `config.json` + `model.safetensors` from a model directory and
/// exposes the raw hidden states; pooling happens in the embedder.
pub struct BertEncoder {
    bert: BertModel,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, device)? };

        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb.clone(), &config)?
        };

        Ok(Self { bert })
    }

    /// Runs the encoder and returns hidden states of shape `[batch, seq, hidden]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.bert.forward(input_ids, token_type_ids, attention_mask)
    }

    /// Converts hidden states to f32 if the encoder runs in another dtype.
    pub fn to_f32(&self, t: Tensor) -> Result<Tensor> {
        if t.dtype() == DType::F32 {
            Ok(t)
        } else {
            t.to_dtype(DType::F32)
        }
    }
}
