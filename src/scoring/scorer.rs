use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::constants::SCORE_TEMPERATURE;
use crate::llm::{LlmError, TextGenerator};
use crate::parsing::capture_field;

use super::types::ClarityAssessment;

static SCORE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)score\s*:\s*\**\s*([0-9]+)").expect("valid score regex")
});

static JUSTIFICATION_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)justification\s*:\s*\**\s*(.+)").expect("valid justification regex")
});

pub struct ClarityScorer {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl std::fmt::Debug for ClarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClarityScorer")
            .field("model", &self.model)
            .finish()
    }
}

impl ClarityScorer {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Rates how likely `question` is to confuse a test-taker.
    ///
    /// A response without both fields degrades to [`ClarityAssessment::unparsable`] and is
    /// never retried. Only generator failures are returned as errors.
    pub async fn score(&self, question: &str) -> Result<ClarityAssessment, LlmError> {
        let prompt = build_prompt(question);
        let raw = self
            .generator
            .complete(&self.model, &prompt, SCORE_TEMPERATURE)
            .await?;

        Ok(parse_assessment(&raw))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Reads `Score:` and `Justification:` out of the scoring model's answer.
pub fn parse_assessment(raw: &str) -> ClarityAssessment {
    // ASCII digits only, so a failed parse is an overflow: saturate.
    let score = capture_field(&SCORE_FIELD, raw).map(|s| s.parse::<u64>().unwrap_or(u64::MAX));
    let justification = capture_field(&JUSTIFICATION_FIELD, raw)
        .map(|j| j.trim_matches('*').trim())
        .filter(|j| !j.is_empty());

    match (score, justification) {
        (Some(score), Some(justification)) => {
            let assessment = ClarityAssessment::new(score, justification);
            debug!(score = assessment.score, "Parsed clarity assessment");
            assessment
        }
        _ => {
            warn!(response_len = raw.len(), "Could not parse clarity score");
            ClarityAssessment::unparsable()
        }
    }
}

pub fn build_prompt(question: &str) -> String {
    format!(
        "Rate this exam question for how likely it is to waste students' time due to confusing wording,
0 = perfectly clear, 100 = extremely confusing. DON'T CONSIDER DOUBLE NEGATIVES.
Give it in this format:
1. Score:
2. Justification: (1 line)

Question: {question}
"
    )
}
