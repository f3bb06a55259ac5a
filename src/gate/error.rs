use thiserror::Error;

use crate::embedding::{EmbeddingError, RerankerError};

/// Failures of the gate's models (never a rejection).
#[derive(Debug, Error)]
pub enum GateError {
    #[error("bi-encoder similarity failed: {0}")]
    Similarity(#[from] EmbeddingError),

    #[error("cross-encoder relevance failed: {0}")]
    Relevance(#[from] RerankerError),
}
