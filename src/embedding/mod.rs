//! Encoder models used by the semantic equivalence gate.
//!
//! - [`bi_encoder`] embeds texts independently (coarse cosine similarity).
//! - [`reranker`] scores a text pair jointly (fine-grained relevance).
//!
//! Both run real BERT checkpoints through candle when a model directory is configured and
//! fall back to deterministic lexical stubs otherwise.

/// BERT encoder + classifier wrappers.
pub mod bert;
/// Mean-pooled sentence embedder (bi-encoder).
pub mod bi_encoder;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Cross-encoder pair scorer.
pub mod reranker;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use bi_encoder::{BiEncoder, BiEncoderConfig};
pub use error::EmbeddingError;
pub use reranker::{Reranker, RerankerConfig, RerankerError};
pub use utils::cosine_similarity;
