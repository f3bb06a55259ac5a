use std::path::Path;
use std::sync::Arc;

use candle::{DType, Device, IndexOp, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};

/// Loads `config.json` + `model.safetensors` from `model_dir`.
fn load_weights<'a>(model_dir: &Path, device: &'a Device) -> Result<(VarBuilder<'a>, Config)> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let weights_path = model_dir.join("model.safetensors");
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    Ok((vb, config))
}

/// Sentence-transformers checkpoints store the encoder at the root, HF classifiers nest
/// it under `bert.` or `roberta.`.
fn load_bert(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

/// Plain BERT encoder producing per-token hidden states (bi-encoder backbone).
#[derive(Clone)]
pub struct BertEncoder(Arc<BertModel>);

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (vb, config) = load_weights(model_dir.as_ref(), device)?;
        Ok(Self(Arc::new(load_bert(&vb, &config)?)))
    }

    /// Returns hidden states of shape `[batch, seq_len, hidden]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }

    /// Mean-pools hidden states over the attended tokens: `[batch, hidden]`.
    ///
    /// The tokenizer always emits `[CLS]`, so every row has at least one attended token.
    pub fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        summed.broadcast_div(&counts)
    }
}

struct SequenceClassifier {
    bert: BertModel,
    pooler: Option<Linear>,
    classifier: Linear,
}

/// HF `BertForSequenceClassification` checkpoints carry a `pooler.dense` layer between
/// `[CLS]` and the classifier.
fn load_pooler(vb: &VarBuilder, config: &Config) -> Result<Option<Linear>> {
    for prefix in ["bert.pooler.dense", "roberta.pooler.dense", "pooler.dense"] {
        if vb.contains_tensor(&format!("{prefix}.weight")) {
            let dense = candle_nn::linear(config.hidden_size, config.hidden_size, vb.pp(prefix))?;
            return Ok(Some(dense));
        }
    }
    Ok(None)
}

/// BERT with a single-logit classification head (cross-encoder).
#[derive(Clone)]
pub struct BertClassifier(Arc<SequenceClassifier>);

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (vb, config) = load_weights(model_dir.as_ref(), device)?;
        let bert = load_bert(&vb, &config)?;
        let pooler = load_pooler(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self(Arc::new(SequenceClassifier {
            bert,
            pooler,
            classifier,
        })))
    }

    pub fn has_pooler(&self) -> bool {
        self.0.pooler.is_some()
    }

    /// Returns raw logits of shape `[batch, 1]`: `classifier(tanh(pooler(h_cls)))`, or
    /// `classifier(h_cls)` for checkpoints without a pooler.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .0
            .bert
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        let pooled = match &self.0.pooler {
            Some(dense) => dense.forward(&cls_token)?.tanh()?,
            None => cls_token,
        };
        self.0.classifier.forward(&pooled)
    }
}
