use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::embedding::{BiEncoder, BiEncoderConfig, Reranker, RerankerConfig};

use super::error::GateError;
use super::models::{ModelBackend, RelevanceModel, SimilarityModel};

/// Process-wide gate models, loaded once and shared read-only.
#[derive(Clone)]
pub struct ModelRegistry {
    similarity: Arc<dyn SimilarityModel>,
    relevance: Arc<dyn RelevanceModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Backends currently serving the registry.
pub struct RegistryStatus {
    pub bi_encoder: ModelBackend,
    pub cross_encoder: ModelBackend,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("status", &self.status())
            .finish()
    }
}

impl ModelRegistry {
    pub fn new(similarity: Arc<dyn SimilarityModel>, relevance: Arc<dyn RelevanceModel>) -> Self {
        Self {
            similarity,
            relevance,
        }
    }

    /// Loads both encoders. Blocking: weights are read from disk.
    pub fn load(
        bi_encoder: BiEncoderConfig,
        cross_encoder: RerankerConfig,
    ) -> Result<Self, GateError> {
        let bi_encoder = BiEncoder::load(bi_encoder)?;
        let reranker = Reranker::load(cross_encoder)?;

        let registry = Self::new(Arc::new(bi_encoder), Arc::new(reranker));
        let status = registry.status();
        if status.bi_encoder == ModelBackend::Stub || status.cross_encoder == ModelBackend::Stub {
            warn!(
                bi_encoder = ?status.bi_encoder,
                cross_encoder = ?status.cross_encoder,
                "Semantic gate running with stub models; equivalence decisions are lexical only"
            );
        } else {
            info!("Semantic gate models loaded");
        }

        Ok(registry)
    }

    /// Both encoders in stub mode.
    pub fn stub() -> Result<Self, GateError> {
        Self::load(BiEncoderConfig::stub(), RerankerConfig::stub())
    }

    pub fn similarity(&self) -> &dyn SimilarityModel {
        self.similarity.as_ref()
    }

    pub fn relevance(&self) -> &dyn RelevanceModel {
        self.relevance.as_ref()
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            bi_encoder: self.similarity.backend(),
            cross_encoder: self.relevance.backend(),
        }
    }
}
