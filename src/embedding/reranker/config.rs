use std::path::PathBuf;

use crate::constants::ENCODER_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`Reranker`](super::Reranker).
pub struct RerankerConfig {
    /// Directory containing `config.json`, `model.safetensors`, and `tokenizer.json`.
    pub model_path: Option<PathBuf>,

    /// Max tokens for the concatenated pair.
    pub max_seq_len: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: ENCODER_MAX_SEQ_LEN,
        }
    }
}

impl RerankerConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Creates a config that runs without a model (stub scoring).
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

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
