use serde::Serialize;

use crate::constants::{CLARITY_THRESHOLD, UNPARSABLE_JUSTIFICATION};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Confusion rating of a single question (0 = perfectly clear, 100 = extremely confusing).
pub struct ClarityAssessment {
    /// Score in `[0, 100]`.
    pub score: u8,
    /// One-line reason given by the scoring model.
    pub justification: String,
}

impl ClarityAssessment {
    /// Creates an assessment, clamping `score` to 100.
    pub fn new(score: u64, justification: impl Into<String>) -> Self {
        Self {
            score: score.min(100) as u8,
            justification: justification.into(),
        }
    }

    /// Fallback used when the scoring response is malformed.
    pub fn unparsable() -> Self {
        Self::new(0, UNPARSABLE_JUSTIFICATION)
    }

    /// Returns `true` if the question needs remediation (`score > 20`).
    pub fn needs_rephrasing(&self) -> bool {
        self.score > CLARITY_THRESHOLD
    }
}

impl std::fmt::Display for ClarityAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/100 ({})", self.score, self.justification)
    }
}
