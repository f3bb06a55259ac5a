use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error};

use super::{LlmError, TextGenerator};

/// [`TextGenerator`] backed by the `genai` multi-provider client.
///
/// Provider selection and credentials follow `genai`'s own conventions (e.g. Groq model
/// names resolve to the Groq adapter and read `GROQ_API_KEY`). Each call is bounded by
/// `timeout` and fails hard when it elapses.
#[derive(Clone)]
pub struct GenaiGenerator {
    client: Client,
    timeout: Duration,
}

impl std::fmt::Debug for GenaiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiGenerator")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenaiGenerator {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(Client::default(), timeout)
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl TextGenerator for GenaiGenerator {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = ChatOptions::default().with_temperature(temperature as f64);

        debug!(
            model,
            prompt_len = prompt.len(),
            temperature,
            "Sending completion request"
        );

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(model, request, Some(&options)),
        )
        .await
        .map_err(|_| {
            error!(model, timeout_secs = self.timeout.as_secs(), "Provider timed out");
            LlmError::Timeout {
                model: model.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        })?
        .map_err(|e| {
            error!(model, error = %e, "Provider error");
            LlmError::Provider {
                model: model.to_string(),
                reason: e.to_string(),
            }
        })?;

        let text = response.first_text().unwrap_or_default().to_string();
        debug!(model, response_len = text.len(), "Completion received");

        Ok(text)
    }
}
