use serde::Serialize;

use crate::extract::QuestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// Terminal classification of one question.
pub enum RemediationStatus {
    /// Scored clear; the original wording stays.
    #[serde(rename = "Original Kept")]
    OriginalKept,
    /// A candidate passed the semantic gate and replaces the original.
    #[serde(rename = "Rephrased")]
    Rephrased,
    /// Every attempt was rejected; a human has to look at it.
    #[serde(rename = "Manual Review Required")]
    ManualReviewRequired,
}

impl RemediationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationStatus::OriginalKept => "Original Kept",
            RemediationStatus::Rephrased => "Rephrased",
            RemediationStatus::ManualReviewRequired => "Manual Review Required",
        }
    }
}

impl std::fmt::Display for RemediationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Per-question report.
pub struct RemediationResult {
    pub id: QuestionId,
    pub original_question: String,
    pub score: u8,
    pub justification: String,
    /// Rephrased text when `status` is [`RemediationStatus::Rephrased`], else the original.
    pub final_text: String,
    pub status: RemediationStatus,
}
