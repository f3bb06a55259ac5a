//! Semantic equivalence gate.
//!
//! Decides whether a rephrase candidate may replace the original question. Checks run in
//! order and stop at the first failure:
//!
//! 1. candidate equal to the original after trimming and case folding → reject
//! 2. bi-encoder cosine similarity below [`BI_ENCODER_THRESHOLD`] → reject
//! 3. cross-encoder relevance below [`CROSS_ENCODER_THRESHOLD`] → reject
//! 4. accept
//!
//! The encoders live in a [`ModelRegistry`] built once per process and shared by every
//! evaluation.

pub mod error;
pub mod models;
pub mod registry;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::GateError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingSimilarity, ScriptedRelevance, ScriptedSimilarity};
pub use models::{ModelBackend, RelevanceModel, SimilarityModel};
pub use registry::{ModelRegistry, RegistryStatus};
pub use types::GateDecision;

use tracing::debug;

use crate::constants::{BI_ENCODER_THRESHOLD, CROSS_ENCODER_THRESHOLD};

#[derive(Debug, Clone)]
pub struct SemanticGate {
    registry: ModelRegistry,
}

impl SemanticGate {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    /// Runs the checks and reports which one decided. Blocking (model inference).
    pub fn evaluate(&self, original: &str, candidate: &str) -> Result<GateDecision, GateError> {
        if normalize(original) == normalize(candidate) {
            debug!("Candidate identical to original");
            return Ok(GateDecision::Unchanged);
        }

        let similarity = self
            .registry
            .similarity()
            .cosine_similarity(original, candidate)?;
        if below(similarity, BI_ENCODER_THRESHOLD) {
            debug!(similarity, threshold = BI_ENCODER_THRESHOLD, "Bi-encoder rejected candidate");
            return Ok(GateDecision::LowSimilarity { similarity });
        }

        let relevance = self.registry.relevance().relevance(original, candidate)?;
        if below(relevance, CROSS_ENCODER_THRESHOLD) {
            debug!(
                similarity,
                relevance,
                threshold = CROSS_ENCODER_THRESHOLD,
                "Cross-encoder rejected candidate"
            );
            return Ok(GateDecision::LowRelevance {
                similarity,
                relevance,
            });
        }

        Ok(GateDecision::Accepted {
            similarity,
            relevance,
        })
    }

    pub fn accepts(&self, original: &str, candidate: &str) -> Result<bool, GateError> {
        Ok(self.evaluate(original, candidate)?.is_accepted())
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Inclusive threshold check. NaN never passes.
fn below(score: f32, threshold: f32) -> bool {
    score.is_nan() || score < threshold
}
