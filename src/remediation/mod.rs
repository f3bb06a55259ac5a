//! Clarity remediation.
//!
//! [`RemediationLoop`] drives one question through score → (rephrase → gate)* until one
//! of three terminal states is reached:
//!
//! ```text
//! Scored ──score ≤ 20──────────────────────────────► OriginalKept
//!   │
//!   └─score > 20──► Attempting(0) ──accepted──────► Rephrased
//!                     │   ▲
//!                rejected └─ k+1 < 6
//!                     │
//!                     └─ k+1 = 6 ─────────────────► ManualReviewRequired
//! ```
//!
//! [`ExamAnalyzer`] runs the whole document pipeline: bytes → text → questions → results.

pub mod analyzer;
pub mod error;
mod state;
pub mod types;


pub use analyzer::{AnalyzerSettings, ExamAnalyzer};
pub use error::AnalysisError;
pub use types::{RemediationResult, RemediationStatus};

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::extract::Question;
use crate::gate::{GateDecision, SemanticGate};
use crate::rephrase::Rephraser;
use crate::scoring::ClarityScorer;

use state::{LoopState, Terminal};

#[derive(Debug)]
pub struct RemediationLoop {
    scorer: ClarityScorer,
    rephraser: Rephraser,
    gate: Arc<SemanticGate>,
}

impl RemediationLoop {
    pub fn new(scorer: ClarityScorer, rephraser: Rephraser, gate: Arc<SemanticGate>) -> Self {
        Self {
            scorer,
            rephraser,
            gate,
        }
    }

    /// Remediates one question. Returns `None` for questions without text.
    #[instrument(skip(self, question), fields(question_id = %question.id))]
    pub async fn remediate(
        &self,
        question: &Question,
    ) -> Result<Option<RemediationResult>, AnalysisError> {
        if question.is_blank() {
            debug!("Skipping question without text");
            return Ok(None);
        }

        let original = question.text.as_str();
        let assessment = self.scorer.score(original).await?;
        debug!(score = assessment.score, "Question scored");

        let mut state = LoopState::scored(assessment.needs_rephrasing());
        let terminal = loop {
            let attempt_index = match state {
                LoopState::Done(terminal) => break terminal,
                LoopState::Attempting { attempt_index } => attempt_index,
            };

            let attempt = self
                .rephraser
                .rephrase(original, &assessment, attempt_index)
                .await?;
            let decision = self.check(original, &attempt.candidate_text).await?;

            state = if decision.is_accepted() {
                LoopState::accepted(attempt_index, attempt.candidate_text)
            } else {
                info!(
                    attempt = attempt_index + 1,
                    question_id = %question.id,
                    decision = decision.debug_status(),
                    "Rephrase attempt failed validation"
                );
                LoopState::rejected(attempt_index)
            };
        };

        let status = terminal.status();
        let final_text = match terminal {
            Terminal::Rephrased {
                candidate,
                attempt_index,
            } => {
                debug!(attempt = attempt_index + 1, "Candidate accepted");
                candidate
            }
            Terminal::ManualReviewRequired { attempts } => {
                debug!(attempts, "Rephrase attempts exhausted");
                question.text.clone()
            }
            Terminal::OriginalKept => question.text.clone(),
        };

        info!(score = assessment.score, status = %status, "Question remediated");

        Ok(Some(RemediationResult {
            id: question.id.clone(),
            original_question: question.text.clone(),
            score: assessment.score,
            justification: assessment.justification,
            final_text,
            status,
        }))
    }

    /// Runs the gate off the async executor; inference is CPU-bound.
    async fn check(&self, original: &str, candidate: &str) -> Result<GateDecision, AnalysisError> {
        let gate = Arc::clone(&self.gate);
        let original = original.to_string();
        let candidate = candidate.to_string();

        let decision = tokio::task::spawn_blocking(move || gate.evaluate(&original, &candidate))
            .await
            .map_err(|e| AnalysisError::Task {
                reason: e.to_string(),
            })??;

        Ok(decision)
    }

    pub fn gate(&self) -> &SemanticGate {
        &self.gate
    }
}
