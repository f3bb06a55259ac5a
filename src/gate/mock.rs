//! Scripted gate models for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embedding::{EmbeddingError, RerankerError};

use super::models::{ModelBackend, RelevanceModel, SimilarityModel};

type PairScore = dyn Fn(&str, &str) -> f32 + Send + Sync;

/// Similarity model answering from a closure.
pub struct ScriptedSimilarity {
    score: Box<PairScore>,
    calls: AtomicUsize,
}

impl ScriptedSimilarity {
    pub fn new<F>(score: F) -> Self
    where
        F: Fn(&str, &str) -> f32 + Send + Sync + 'static,
    {
        Self {
            score: Box::new(score),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn constant(score: f32) -> Self {
        Self::new(move |_, _| score)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimilarityModel for ScriptedSimilarity {
    fn cosine_similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.score)(a, b))
    }

    fn backend(&self) -> ModelBackend {
        ModelBackend::Scripted
    }
}

/// Relevance model answering from a closure.
pub struct ScriptedRelevance {
    score: Box<PairScore>,
    calls: AtomicUsize,
}

impl ScriptedRelevance {
    pub fn new<F>(score: F) -> Self
    where
        F: Fn(&str, &str) -> f32 + Send + Sync + 'static,
    {
        Self {
            score: Box::new(score),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn constant(score: f32) -> Self {
        Self::new(move |_, _| score)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RelevanceModel for ScriptedRelevance {
    fn relevance(&self, a: &str, b: &str) -> Result<f32, RerankerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.score)(a, b))
    }

    fn backend(&self) -> ModelBackend {
        ModelBackend::Scripted
    }
}

/// Similarity model that always fails.
#[derive(Debug, Default)]
pub struct FailingSimilarity;

impl SimilarityModel for FailingSimilarity {
    fn cosine_similarity(&self, _a: &str, _b: &str) -> Result<f32, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "scripted failure".to_string(),
        })
    }

    fn backend(&self) -> ModelBackend {
        ModelBackend::Scripted
    }
}
