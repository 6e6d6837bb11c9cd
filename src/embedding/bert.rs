//! Sentence embeddings from a BERT-family encoder (mean pooling over the last hidden state).

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::config::EmbedderConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::{Embedder, l2_normalize};

/// Embedder backed by a local safetensors BERT checkpoint.
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    hidden_size: usize,
}

impl std::fmt::Debug for BertEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEmbedder")
            .field("device", &format!("{:?}", self.device))
            .field("hidden_size", &self.hidden_size)
            .finish()
    }
}

impl BertEmbedder {
    /// Loads the model described by `config`. `config.model_path` must be set.
    pub fn load(config: &EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_path.as_deref() else {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path is required to load a BERT embedder".to_string(),
            });
        };

        let device = select_device();
        debug!(?device, "Selected compute device for embedder");

        let (model, hidden_size) = load_model(model_dir, &device)?;
        let tokenizer = load_tokenizer(model_dir, config.max_seq_len)?;

        info!(
            model_path = %model_dir.display(),
            hidden_size,
            max_seq_len = config.max_seq_len,
            "Embedding model loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            hidden_size,
        })
    }

    fn forward_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            masks.push(Tensor::new(encoding.get_attention_mask(), &self.device)?);
        }

        // [batch, seq_len]
        let input_ids = Tensor::stack(&ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // [batch, seq_len, hidden]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        // Mean over real tokens only; padding positions carry a zero mask.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        let mut vectors = pooled.to_vec2::<f32>()?;
        for vector in &mut vectors {
            l2_normalize(vector);
        }

        Ok(vectors)
    }
}

impl Embedder for BertEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), "Embedding batch");
        self.forward_batch(texts)
    }

    fn embedding_dim(&self) -> usize {
        self.hidden_size
    }

    fn is_stub(&self) -> bool {
        false
    }
}

#[derive(serde::Deserialize)]
struct ModelDims {
    hidden_size: usize,
}

fn load_model(model_dir: &Path, device: &Device) -> Result<(BertModel, usize), EmbeddingError> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let parse_err = |e: serde_json::Error| EmbeddingError::ModelLoadFailed {
        reason: format!("Failed to parse config.json: {}", e),
    };
    let config: Config = serde_json::from_str(&config_content).map_err(parse_err)?;
    let dims: ModelDims = serde_json::from_str(&config_content).map_err(parse_err)?;

    let weights_path = model_dir.join("model.safetensors");
    // SAFETY: the weights file is treated as read-only for the lifetime of the mapping.
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    // Sentence-transformers checkpoints store the encoder either at the root or under `bert.`.
    let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), &config)
    } else {
        BertModel::load(vb, &config)
    }
    .map_err(|e| EmbeddingError::ModelLoadFailed {
        reason: format!("Failed to load BERT weights: {}", e),
    })?;

    Ok((model, dims.hidden_size))
}

fn load_tokenizer(model_dir: &Path, max_seq_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(|e| {
        EmbeddingError::TokenizationFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        }
    })?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_seq_len,
            ..Default::default()
        }))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;
    tokenizer.with_padding(Some(PaddingParams::default()));

    Ok(tokenizer)
}
