use thiserror::Error;

/// Failures of the generative-text capability.
///
/// These are infrastructure failures. They abort the analysis of the current document and
/// are never retried by the remediation loop.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider did not answer within the configured timeout.
    #[error("model '{model}' did not respond within {timeout_secs}s")]
    Timeout { model: String, timeout_secs: u64 },

    /// The provider returned an error (network, auth, rate limit, ...).
    #[error("model '{model}' request failed: {reason}")]
    Provider { model: String, reason: String },
}

impl LlmError {
    /// Returns the model identifier the failed request was addressed to.
    pub fn model(&self) -> &str {
        match self {
            LlmError::Timeout { model, .. } | LlmError::Provider { model, .. } => model,
        }
    }
}
