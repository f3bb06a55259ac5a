use std::path::PathBuf;

use crate::constants::{BI_ENCODER_DIM, ENCODER_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// Default number of memoized embeddings.
pub const DEFAULT_CACHE_CAPACITY: u64 = 4_096;

#[derive(Debug, Clone)]
/// Configuration for [`BiEncoder`](super::BiEncoder).
pub struct BiEncoderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the lexical stub.
    pub model_path: Option<PathBuf>,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Dimension of stub embeddings (real models use their hidden size).
    pub stub_dim: usize,
    /// Embeddings kept in the in-process memo.
    pub cache_capacity: u64,
}

impl Default for BiEncoderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            stub_dim: BI_ENCODER_DIM,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl BiEncoderConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic lexical embeddings).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Builds a config from an optional model directory.
    pub fn from_path(model_path: Option<PathBuf>) -> Self {
        Self {
            model_path,
            ..Default::default()
        }
    }

    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.stub_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "stub_dim must be greater than zero".to_string(),
            });
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }
}
