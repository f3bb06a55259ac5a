//! Scripted generator for tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{LlmError, TextGenerator};

/// One recorded call to [`MockGenerator::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCall {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

type Responder = dyn Fn(&GenerationCall) -> Result<String, LlmError> + Send + Sync;

/// Generator whose answers come from a closure; every call is recorded.
pub struct MockGenerator {
    responder: Box<Responder>,
    calls: Mutex<Vec<GenerationCall>>,
}

impl std::fmt::Debug for MockGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGenerator")
            .field("calls", &self.calls.lock().len())
            .finish()
    }
}

impl MockGenerator {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&GenerationCall) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn constant(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with a provider error.
    pub fn failing(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(move |call| {
            Err(LlmError::Provider {
                model: call.model.clone(),
                reason: reason.clone(),
            })
        })
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().clone()
    }

    pub fn calls_for(&self, model: &str) -> Vec<GenerationCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.model == model)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let call = GenerationCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            temperature,
        };
        let result = (self.responder)(&call);
        self.calls.lock().push(call);
        result
    }
}
