//! Question rephrasing.
//!
//! Each attempt is one independent generation request. The temperature rises with the
//! attempt index and every retry tells the model its previous candidate was rejected.


use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::constants::rephrase_temperature;
use crate::llm::{LlmError, TextGenerator};
use crate::scoring::ClarityAssessment;

const RETRY_INSTRUCTION: &str = "Your previous attempt was rejected for not matching the original meaning. Try a different structure while staying strictly faithful to the core intent.";

/// One candidate produced by [`Rephraser::rephrase`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RephraseAttempt {
    /// Zero-based attempt index.
    pub attempt_index: u32,
    pub temperature: f32,
    /// Trimmed model output.
    pub candidate_text: String,
}

pub struct Rephraser {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl std::fmt::Debug for Rephraser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rephraser")
            .field("model", &self.model)
            .finish()
    }
}

impl Rephraser {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Asks for a clearer wording of `original`, guided by the scorer's justification.
    pub async fn rephrase(
        &self,
        original: &str,
        assessment: &ClarityAssessment,
        attempt_index: u32,
    ) -> Result<RephraseAttempt, LlmError> {
        let temperature = rephrase_temperature(attempt_index);
        let prompt = build_prompt(original, &assessment.justification, attempt_index);

        let raw = self
            .generator
            .complete(&self.model, &prompt, temperature)
            .await?;

        let candidate_text = raw.trim().to_string();
        debug!(
            attempt = attempt_index + 1,
            temperature,
            candidate_len = candidate_text.len(),
            "Rephrase candidate generated"
        );

        Ok(RephraseAttempt {
            attempt_index,
            temperature,
            candidate_text,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

pub fn build_prompt(original: &str, justification: &str, attempt_index: u32) -> String {
    let retry = if attempt_index > 0 {
        RETRY_INSTRUCTION
    } else {
        ""
    };

    format!(
        "Rephrase the question to be clearer (score below 20).
{retry}
Original: {original}
Justification: {justification}
Output ONLY the rephrased question."
    )
}
