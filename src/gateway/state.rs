use std::sync::Arc;

use crate::remediation::ExamAnalyzer;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ExamAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<ExamAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Body limit handed to axum: one byte over the analysis limit, so oversized uploads
    /// still reach the pipeline and come back as an empty result list.
    pub fn body_limit(&self) -> usize {
        self.analyzer.max_document_bytes().saturating_add(1)
    }
}
