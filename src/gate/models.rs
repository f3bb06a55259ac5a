//! Model seams used by the gate.

use serde::Serialize;

use crate::embedding::{BiEncoder, EmbeddingError, Reranker, RerankerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// What is actually answering a model call.
pub enum ModelBackend {
    /// Real checkpoint loaded from disk.
    Model,
    /// Deterministic lexical stand-in.
    Stub,
    /// Test double.
    Scripted,
}

/// Embedding similarity of two texts (bi-encoder).
pub trait SimilarityModel: Send + Sync {
    fn cosine_similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError>;

    fn backend(&self) -> ModelBackend;
}

/// Joint relevance of a text pair (cross-encoder).
pub trait RelevanceModel: Send + Sync {
    fn relevance(&self, a: &str, b: &str) -> Result<f32, RerankerError>;

    fn backend(&self) -> ModelBackend;
}

impl SimilarityModel for BiEncoder {
    fn cosine_similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        self.similarity(a, b)
    }

    fn backend(&self) -> ModelBackend {
        if self.is_stub() {
            ModelBackend::Stub
        } else {
            ModelBackend::Model
        }
    }
}

impl RelevanceModel for Reranker {
    fn relevance(&self, a: &str, b: &str) -> Result<f32, RerankerError> {
        self.score(a, b)
    }

    fn backend(&self) -> ModelBackend {
        if self.is_model_loaded() {
            ModelBackend::Model
        } else {
            ModelBackend::Stub
        }
    }
}
