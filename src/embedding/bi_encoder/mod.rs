//! Sentence bi-encoder (MiniLM-style BERT, mean pooling, unit-normalized).
//!
//! Use [`BiEncoderConfig::stub`] for tests without model files.

/// Bi-encoder configuration.
pub mod config;


pub use config::{BiEncoderConfig, DEFAULT_CACHE_CAPACITY};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use moka::sync::Cache;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{cosine_similarity, l2_normalize, load_tokenizer, missing_model_file};

enum EncoderBackend {
    Model {
        model: BertEncoder,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Embedding generator for coarse similarity checks (supports stub mode).
///
/// Embeddings are memoized by the blake3 hash of the input, so the original question is
/// encoded once even though every rephrase attempt compares against it.
pub struct BiEncoder {
    backend: EncoderBackend,
    config: BiEncoderConfig,
    memo: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl std::fmt::Debug for BiEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("config", &self.config)
            .finish()
    }
}

impl BiEncoder {
    /// Loads the encoder from a config (stub mode when no model path is set).
    pub fn load(config: BiEncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let memo = Cache::new(config.cache_capacity);

        let Some(model_path) = config.model_path.clone() else {
            debug!("Bi-encoder running in stub mode (lexical embeddings)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
                memo,
            });
        };

        if !model_path.is_dir() {
            return Err(EmbeddingError::ModelNotFound { path: model_path });
        }
        if let Some(file) = missing_model_file(&model_path) {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {} in {}", file, model_path.display()),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for bi-encoder");

        let model = BertEncoder::load(&model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;
        let tokenizer = load_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_path = %model_path.display(),
            max_seq_len = config.max_seq_len,
            "Bi-encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            memo,
        })
    }

    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(BiEncoderConfig::stub())
    }

    /// Returns the unit-normalized embedding of `text` (memoized).
    pub fn embed(&self, text: &str) -> Result<Arc<Vec<f32>>, EmbeddingError> {
        let key = *blake3::hash(text.as_bytes()).as_bytes();
        if let Some(hit) = self.memo.get(&key) {
            return Ok(hit);
        }

        let mut embedding = match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device)?,
            EncoderBackend::Stub => self.embed_stub(text),
        };
        l2_normalize(&mut embedding);

        let embedding = Arc::new(embedding);
        self.memo.insert(key, Arc::clone(&embedding));
        Ok(embedding)
    }

    /// Cosine similarity of the two texts' embeddings.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        let ea = self.embed(a)?;
        let eb = self.embed(b)?;
        Ok(cosine_similarity(&ea, &eb))
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Encoding sentence"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let hidden = model.forward(&input_ids, &type_ids, Some(&attention_mask))?;
        let pooled = BertEncoder::mean_pool(&hidden, &attention_mask)?;

        Ok(pooled.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// Hashed bag-of-words vector: texts sharing vocabulary point the same way.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.stub_dim;
        let mut embedding = vec![0.0f32; dim];

        let lowered = text.to_lowercase();
        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let hash = blake3::hash(word.as_bytes());
            let mut bucket = [0u8; 8];
            bucket.copy_from_slice(&hash.as_bytes()[..8]);
            embedding[(u64::from_le_bytes(bucket) % dim as u64) as usize] += 1.0;
        }

        embedding
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Number of memoized embeddings (approximate, see moka's `entry_count`).
    pub fn memo_len(&self) -> u64 {
        self.memo.run_pending_tasks();
        self.memo.entry_count()
    }

    pub fn config(&self) -> &BiEncoderConfig {
        &self.config
    }
}
