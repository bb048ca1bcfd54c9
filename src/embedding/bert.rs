//! BERT models loaded from safetensors: a sequence classifier (cross-encoder head) and a
//! mean-pooled sentence encoder.

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

fn load_config_and_weights(model_dir: &Path, device: &Device) -> Result<(Config, VarBuilder<'static>)> {
    let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
    let config: Config = serde_json::from_str(&config_content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

    let weights_path = model_dir.join("model.safetensors");
    // SAFETY: the weights file is opened read-only and must not be modified while mapped.
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

    Ok((config, vb))
}

/// Loads the encoder body whichever prefix the checkpoint uses.
fn load_bert_body(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("bert"), config)
    } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
        BertModel::load(vb.pp("roberta"), config)
    } else {
        BertModel::load(vb.clone(), config)
    }
}

struct SequenceClassifierImpl {
    bert: BertModel,
    classifier: Linear,
}

/// BERT with a single-logit classification head over `[CLS]` (MS MARCO cross-encoders).
#[derive(Clone)]
pub struct BertClassifier(Arc<SequenceClassifierImpl>);

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (config, vb) = load_config_and_weights(model_dir.as_ref(), device)?;
        let bert = load_bert_body(&vb, &config)?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self(Arc::new(SequenceClassifierImpl { bert, classifier })))
    }

    /// Returns raw logits shaped `[batch, 1]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self.0.bert.forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.0.classifier.forward(&cls_token)
    }
}

/// BERT body used as a sentence encoder (MiniLM-style checkpoints).
#[derive(Clone)]
pub struct BertSentenceModel {
    bert: Arc<BertModel>,
    hidden_size: usize,
}

impl BertSentenceModel {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let (config, vb) = load_config_and_weights(model_dir.as_ref(), device)?;
        let bert = load_bert_body(&vb, &config)?;

        Ok(Self {
            bert: Arc::new(bert),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Mean-pools the last hidden state of a single unpadded sequence into `[hidden]`.
    pub fn embed(&self, input_ids: &Tensor, token_type_ids: &Tensor) -> Result<Vec<f32>> {
        let output = self.bert.forward(input_ids, token_type_ids, None)?;
        output.mean(1)?.squeeze(0)?.to_vec1::<f32>()
    }
}
