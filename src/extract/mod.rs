//! Question extraction: document text → ordered [`Question`] list.
//!
//! One generation request per document. The answer is parsed tolerantly: a response that
//! cannot be understood means "no questions found", never an error.

pub mod shapes;
pub mod types;


pub use shapes::{ResponseShape, WRAPPER_KEYS, questions_from_value};
pub use types::{Question, QuestionId};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::EXTRACT_TEMPERATURE;
use crate::llm::{LlmError, TextGenerator};
use crate::parsing::extract_json;

pub struct QuestionExtractor {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl std::fmt::Debug for QuestionExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionExtractor")
            .field("model", &self.model)
            .finish()
    }
}

impl QuestionExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Extracts the questions of `document_text` in document order.
    ///
    /// Blank input short-circuits without a model call. Only a failure of the generative
    /// capability itself is returned as an error.
    pub async fn extract(&self, document_text: &str) -> Result<Vec<Question>, LlmError> {
        if document_text.trim().is_empty() {
            debug!("Empty document text, skipping extraction");
            return Ok(Vec::new());
        }

        let prompt = build_prompt(document_text);
        let raw = self
            .generator
            .complete(&self.model, &prompt, EXTRACT_TEMPERATURE)
            .await?;

        let questions = parse_response(&raw);
        info!(count = questions.len(), "Questions extracted");

        Ok(questions)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Parses the extraction model's answer into questions (empty on any mismatch).
pub fn parse_response(raw: &str) -> Vec<Question> {
    let Some(value) = extract_json(raw) else {
        warn!(response_len = raw.len(), "No parsable JSON in extraction response");
        return Vec::new();
    };

    let questions = questions_from_value(&value);
    if questions.is_empty() {
        debug!("Extraction response did not match a known shape");
    }
    questions
}

pub fn build_prompt(document_text: &str) -> String {
    format!(
        r#"Extract ALL exam questions from the text below.
Return JSON in ONE of these forms:
1) [{{"id": 1, "question": "..."}}]
2) {{ "questions": [{{"id": 1, "question": "..."}}] }}

TEXT:
{document_text}
"#
    )
}
