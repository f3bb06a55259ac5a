use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, DEFAULT_QUESTION_CONCURRENCY, ModelRoles};
use crate::constants::MAX_DOCUMENT_BYTES;
use crate::extract::QuestionExtractor;
use crate::gate::{ModelRegistry, SemanticGate};
use crate::llm::TextGenerator;
use crate::rephrase::Rephraser;
use crate::scoring::ClarityScorer;
use crate::source::{DocumentTextSource, TextSource};

use super::error::AnalysisError;
use super::types::{RemediationResult, RemediationStatus};
use super::RemediationLoop;

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub models: ModelRoles,
    pub max_document_bytes: usize,
    /// Questions in flight at once (clamped to at least 1).
    pub question_concurrency: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            models: ModelRoles::default(),
            max_document_bytes: MAX_DOCUMENT_BYTES,
            question_concurrency: DEFAULT_QUESTION_CONCURRENCY,
        }
    }
}

impl From<&Config> for AnalyzerSettings {
    fn from(config: &Config) -> Self {
        Self {
            models: config.models.clone(),
            max_document_bytes: config.max_document_bytes,
            question_concurrency: config.question_concurrency,
        }
    }
}

/// Document pipeline: bytes → text → questions → one result per non-blank question.
pub struct ExamAnalyzer {
    source: Arc<dyn TextSource>,
    extractor: QuestionExtractor,
    remediation: RemediationLoop,
    max_document_bytes: usize,
    concurrency: usize,
}

impl std::fmt::Debug for ExamAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamAnalyzer")
            .field("extractor", &self.extractor)
            .field("remediation", &self.remediation)
            .field("max_document_bytes", &self.max_document_bytes)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl ExamAnalyzer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        registry: ModelRegistry,
        settings: AnalyzerSettings,
    ) -> Self {
        let extractor = QuestionExtractor::new(Arc::clone(&generator), &settings.models.extract);
        let scorer = ClarityScorer::new(Arc::clone(&generator), &settings.models.score);
        let rephraser = Rephraser::new(generator, &settings.models.rephrase);
        let gate = Arc::new(SemanticGate::new(registry));

        Self {
            source: Arc::new(DocumentTextSource),
            extractor,
            remediation: RemediationLoop::new(scorer, rephraser, gate),
            max_document_bytes: settings.max_document_bytes,
            concurrency: settings.question_concurrency.max(1),
        }
    }

    /// Replaces the text source adapter.
    pub fn with_source(mut self, source: Arc<dyn TextSource>) -> Self {
        self.source = source;
        self
    }

    /// Analyzes one uploaded document.
    ///
    /// Oversized or unreadable documents yield an empty result list. Generation and gate
    /// model failures abort the whole document.
    #[instrument(skip(self, document), fields(bytes = document.len()))]
    pub async fn analyze(&self, document: &[u8]) -> Result<Vec<RemediationResult>, AnalysisError> {
        if document.len() > self.max_document_bytes {
            warn!(
                bytes = document.len(),
                limit = self.max_document_bytes,
                "Document too large, skipping analysis"
            );
            return Ok(Vec::new());
        }

        let text = self.extract_text(document).await?;
        if text.trim().is_empty() {
            debug!("No text extracted from document");
            return Ok(Vec::new());
        }

        let questions = self.extractor.extract(&text).await?;
        info!(count = questions.len(), "Found questions");

        let pending: Vec<_> = questions
            .iter()
            .map(|question| self.remediation.remediate(question))
            .collect();
        let results: Vec<RemediationResult> = stream::iter(pending)
        .buffered(self.concurrency)
        .try_collect::<Vec<_>>()
        .await?
        .into_iter()
        .flatten()
        .collect();

        let count = |status| results.iter().filter(|r| r.status == status).count();
        info!(
            results = results.len(),
            kept = count(RemediationStatus::OriginalKept),
            rephrased = count(RemediationStatus::Rephrased),
            manual_review = count(RemediationStatus::ManualReviewRequired),
            "Analysis complete"
        );

        Ok(results)
    }

    async fn extract_text(&self, document: &[u8]) -> Result<String, AnalysisError> {
        let source = Arc::clone(&self.source);
        let document = document.to_vec();

        tokio::task::spawn_blocking(move || source.extract_text(&document))
            .await
            .map_err(|e| AnalysisError::Task {
                reason: e.to_string(),
            })
    }

    pub fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    pub fn gate(&self) -> &SemanticGate {
        self.remediation.gate()
    }
}
