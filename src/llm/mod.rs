//! Generative-text capability.
//!
//! Every prompt in the pipeline goes through [`TextGenerator::complete`]. The production
//! backend is [`GenaiGenerator`]; tests script responses with `MockGenerator`
//! (behind `#[cfg(any(test, feature = "mock"))]`).

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::GenaiGenerator;
pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{GenerationCall, MockGenerator};

use async_trait::async_trait;

/// A text-completion backend addressed by model identifier.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends a single user prompt and returns the raw completion text.
    async fn complete(&self, model: &str, prompt: &str, temperature: f32)
    -> Result<String, LlmError>;
}
