pub mod config;
pub mod error;


pub use config::RerankerConfig;
pub use error::RerankerError;

use std::collections::HashSet;
use std::sync::LazyLock;

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::bert::BertClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::{load_tokenizer, missing_model_file, sigmoid};

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
        "can", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "and",
        "but", "if", "or", "so", "than", "too", "very", "just", "this", "that", "these", "those",
        "it", "its", "which", "what", "who", "whom",
    ]
    .into_iter()
    .collect()
});

/// Cross-encoder that scores a text pair jointly.
///
/// With a model loaded the raw logit is squashed through a sigmoid so scores are in
/// `[0, 1]`. Without one, a lexical-overlap heuristic in the same range is used.
pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model: Option<(BertClassifier, Tokenizer)>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            debug!("No cross-encoder model configured, reranker running in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
            });
        };

        if !model_path.is_dir() {
            return Err(RerankerError::ModelNotFound { path: model_path });
        }
        if let Some(file) = missing_model_file(&model_path) {
            return Err(RerankerError::ModelLoadFailed {
                reason: format!("Missing {} in {}", file, model_path.display()),
            });
        }

        info!(model_path = %model_path.display(), "Loading cross-encoder model");

        let model = BertClassifier::load(&model_path, &device).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!("Cross-encoder model loaded successfully");

        Ok(Self {
            device,
            config,
            model: Some((model, tokenizer)),
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    /// Relevance of `candidate` to `query`, in `[0, 1]`.
    pub fn score(&self, query: &str, candidate: &str) -> Result<f32, RerankerError> {
        debug!(
            query_len = query.len(),
            candidate_len = candidate.len(),
            model_loaded = self.is_model_loaded(),
            "Scoring text pair"
        );

        let Some((model, tokenizer)) = &self.model else {
            return Ok(lexical_overlap_score(query, candidate));
        };

        let tokens = tokenizer.encode((query, candidate), true).map_err(|e| {
            RerankerError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| RerankerError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let logit = logits
            .flatten_all()?
            .to_vec1::<f32>()?
            .first()
            .copied()
            .ok_or_else(|| RerankerError::InferenceFailed {
                reason: "classifier produced no logits".to_string(),
            })?;

        Ok(sigmoid(logit))
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }
}

fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Recall/Jaccard blend of content words pushed through a logistic curve.
fn lexical_overlap_score(query: &str, candidate: &str) -> f32 {
    let query_words = content_words(query);
    let candidate_words = content_words(candidate);

    if query_words.is_empty() {
        let len_ratio = (query.len().min(candidate.len()) as f32)
            / (query.len().max(candidate.len()).max(1) as f32);
        return len_ratio * 0.3;
    }

    let matches = query_words.intersection(&candidate_words).count();
    let recall = matches as f32 / query_words.len() as f32;

    let union = query_words.union(&candidate_words).count();
    let jaccard = if union > 0 {
        matches as f32 / union as f32
    } else {
        0.0
    };

    let base_score = 0.6 * recall + 0.4 * jaccard;
    sigmoid(8.0 * (base_score - 0.5)).clamp(0.0, 1.0)
}
