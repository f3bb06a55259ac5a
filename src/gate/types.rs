use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
/// Outcome of one gate evaluation.
pub enum GateDecision {
    /// Both stages passed.
    Accepted {
        /// Bi-encoder cosine similarity.
        similarity: f32,
        /// Cross-encoder relevance.
        relevance: f32,
    },
    /// Candidate is the original up to case and surrounding whitespace.
    Unchanged,
    /// Coarse stage failed; the cross-encoder was not consulted.
    LowSimilarity {
        similarity: f32,
    },
    /// Fine stage failed.
    LowRelevance {
        similarity: f32,
        relevance: f32,
    },
}

impl GateDecision {
    /// Returns `true` if the candidate may replace the original.
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accepted { .. })
    }

    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            GateDecision::Accepted { .. } => "ACCEPTED",
            GateDecision::Unchanged => "UNCHANGED",
            GateDecision::LowSimilarity { .. } => "LOW_SIMILARITY",
            GateDecision::LowRelevance { .. } => "LOW_RELEVANCE",
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateDecision::Accepted {
                similarity,
                relevance,
            } => write!(
                f,
                "ACCEPTED (similarity: {:.4}, relevance: {:.4})",
                similarity, relevance
            ),
            GateDecision::Unchanged => write!(f, "UNCHANGED"),
            GateDecision::LowSimilarity { similarity } => {
                write!(f, "LOW_SIMILARITY (similarity: {:.4})", similarity)
            }
            GateDecision::LowRelevance {
                similarity,
                relevance,
            } => write!(
                f,
                "LOW_RELEVANCE (similarity: {:.4}, relevance: {:.4})",
                similarity, relevance
            ),
        }
    }
}
