use thiserror::Error;

use crate::gate::GateError;
use crate::llm::LlmError;

/// Capability failures that abort the analysis of a document.
///
/// A gate *rejection* is not an error; it feeds the retry path of the remediation loop.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("semantic gate failed: {0}")]
    Gate(#[from] GateError),

    #[error("background task failed: {reason}")]
    Task { reason: String },
}
