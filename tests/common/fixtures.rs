//! Scripted exams and analyzer builders.

use std::sync::Arc;

use clarity::llm::{GenerationCall, MockGenerator};
use clarity::{AnalyzerSettings, ExamAnalyzer, ModelRegistry, ModelRoles};

pub const EXTRACT_MODEL: &str = "test-extract";
pub const SCORE_MODEL: &str = "test-score";
pub const REPHRASE_MODEL: &str = "test-rephrase";

pub fn roles() -> ModelRoles {
    ModelRoles {
        extract: EXTRACT_MODEL.to_string(),
        score: SCORE_MODEL.to_string(),
        rephrase: REPHRASE_MODEL.to_string(),
    }
}

pub fn settings() -> AnalyzerSettings {
    AnalyzerSettings {
        models: roles(),
        ..AnalyzerSettings::default()
    }
}

type CandidateFn = dyn Fn(&str, u32) -> String + Send + Sync;

/// Script for the three generative roles of one exam.
///
/// Scores are looked up by question text appearing in the scoring prompt; unscripted
/// questions score 10.
pub struct ExamScript {
    extraction: String,
    scores: Vec<(String, String)>,
    candidate: Arc<CandidateFn>,
}

impl ExamScript {
    /// Extraction returns the given `(id, text)` pairs as a bare JSON array.
    pub fn new(questions: &[(u64, &str)]) -> Self {
        let records: Vec<serde_json::Value> = questions
            .iter()
            .map(|(id, text)| serde_json::json!({"id": id, "question": text}))
            .collect();
        Self::with_extraction(serde_json::Value::Array(records).to_string())
    }

    /// Extraction returns `raw` verbatim.
    pub fn with_extraction(raw: impl Into<String>) -> Self {
        Self {
            extraction: raw.into(),
            scores: Vec::new(),
            candidate: Arc::new(|original, attempt| format!("{original} (attempt {attempt})")),
        }
    }

    pub fn score(mut self, question: &str, score: u8) -> Self {
        self.scores.push((
            question.to_string(),
            format!("1. Score: {score}\n2. Justification: Scripted justification."),
        ));
        self
    }

    /// Scoring answer for `question` is `raw` verbatim.
    pub fn score_raw(mut self, question: &str, raw: &str) -> Self {
        self.scores.push((question.to_string(), raw.to_string()));
        self
    }

    /// Rephrase answer as a function of the original text and zero-based attempt index.
    pub fn candidates<F>(mut self, candidate: F) -> Self
    where
        F: Fn(&str, u32) -> String + Send + Sync + 'static,
    {
        self.candidate = Arc::new(candidate);
        self
    }

    pub fn generator(self) -> Arc<MockGenerator> {
        let ExamScript {
            extraction,
            scores,
            candidate,
        } = self;

        Arc::new(MockGenerator::new(move |call| {
            Ok(match call.model.as_str() {
                EXTRACT_MODEL => extraction.clone(),
                SCORE_MODEL => scores
                    .iter()
                    .find(|(question, _)| call.prompt.contains(&format!("Question: {question}")))
                    .map(|(_, raw)| raw.clone())
                    .unwrap_or_else(|| {
                        "1. Score: 10\n2. Justification: Scripted justification.".to_string()
                    }),
                _ => candidate(original_of(call), attempt_of(call)),
            })
        }))
    }
}

/// Zero-based rephrase attempt recovered from the request temperature.
pub fn attempt_of(call: &GenerationCall) -> u32 {
    ((call.temperature - 0.2) / 0.1).round() as u32
}

fn original_of(call: &GenerationCall) -> &str {
    call.prompt
        .lines()
        .find_map(|line| line.strip_prefix("Original: "))
        .unwrap_or_default()
}

pub fn analyzer(generator: Arc<MockGenerator>, registry: ModelRegistry) -> ExamAnalyzer {
    ExamAnalyzer::new(generator, registry, settings())
}
