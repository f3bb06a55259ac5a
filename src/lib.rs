//! Exam clarity library crate (used by the server binary and integration tests).
//!
//! # Pipeline
//!
//! ```text
//! document bytes ─► source ─► extract ─► remediation ─► Vec<RemediationResult>
//!                                          │
//!                          scoring ─► rephrase ─► gate (bi-encoder → cross-encoder)
//! ```
//!
//! ## Core Types
//! - [`ExamAnalyzer`], [`AnalyzerSettings`] - Document pipeline
//! - [`RemediationLoop`], [`RemediationResult`], [`RemediationStatus`] - Per-question loop
//! - [`Config`], [`ConfigError`] - Server configuration
//!
//! ## Components
//! - [`QuestionExtractor`], [`Question`] - Question extraction
//! - [`ClarityScorer`], [`ClarityAssessment`] - Clarity scoring
//! - [`Rephraser`], [`RephraseAttempt`] - Candidate generation
//! - [`SemanticGate`], [`ModelRegistry`] - Meaning-preservation check
//! - [`BiEncoder`], [`Reranker`] - Encoder models behind the gate
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod extract;
pub mod gate;
pub mod gateway;
pub mod llm;
pub mod parsing;
pub mod remediation;
pub mod rephrase;
pub mod scoring;
pub mod source;

pub use config::{Config, ConfigError, ModelRoles};
pub use constants::{
    BI_ENCODER_THRESHOLD, CLARITY_THRESHOLD, CROSS_ENCODER_THRESHOLD, MAX_DOCUMENT_BYTES,
    MAX_REPHRASE_ATTEMPTS, rephrase_temperature,
};
pub use embedding::{
    BiEncoder, BiEncoderConfig, EmbeddingError, Reranker, RerankerConfig, RerankerError,
};
pub use extract::{Question, QuestionExtractor, QuestionId};
#[cfg(any(test, feature = "mock"))]
pub use gate::{FailingSimilarity, ScriptedRelevance, ScriptedSimilarity};
pub use gate::{
    GateDecision, GateError, ModelBackend, ModelRegistry, RegistryStatus, RelevanceModel,
    SemanticGate, SimilarityModel,
};
pub use gateway::{AppState, GatewayError, create_router};
#[cfg(any(test, feature = "mock"))]
pub use llm::{GenerationCall, MockGenerator};
pub use llm::{GenaiGenerator, LlmError, TextGenerator};
pub use remediation::{
    AnalysisError, AnalyzerSettings, ExamAnalyzer, RemediationLoop, RemediationResult,
    RemediationStatus,
};
pub use rephrase::{RephraseAttempt, Rephraser};
pub use scoring::{ClarityAssessment, ClarityScorer};
pub use source::{DocumentKind, DocumentTextSource, TextSource};
