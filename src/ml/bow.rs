// ============================================================
// Layer 5 — Bag-of-Words Classifier Backend
// ============================================================
// The default implementation of the Language / TextCategorizer
// capability. Small on purpose: the grader only needs a model
// that can be built, trained, scored, and that behaves the same
// way twice under the same seed.
//
// Model (ndarray, one column per vocabulary entry):
//   counts    = bag-of-words vector over the vocabulary
//   logits    = W · counts + b          W: [labels, vocab]
//   scores    = softmax(logits)   if exclusive_classes
//             = sigmoid(logits)   otherwise
//
// Training (one call to update = one batch):
//   - each token occurrence is dropped with probability `dropout`
//     (kept tokens count 1 / (1 - dropout) instead of 1)
//   - tokens first kept in this batch get a zero column in W
//   - loss is cross-entropy against the label record
//   - dW = (score - truth) ⊗ counts, summed over the batch
//   - one SGD step with the gradients averaged over the batch
//
// Determinism:
//   - vocabulary columns are assigned in first-seen order
//   - dropout draws from the optimizer's own StdRng, which
//     begin_training seeds from the caller's pinned RNG
//   - no threads
//
// Only the "bow" architecture is provided; asking for
// simple_cnn or ensemble is a ModelConstructionError.
//
// Reference: ndarray documentation (ArrayBase, linalg::Dot)
//            rand crate documentation

use std::collections::BTreeMap;

use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::{ClassifierError, ModelConstructionError};
use crate::domain::example::LabelRecord;
use crate::domain::traits::{
    Architecture, Doc, Language, Losses, ScoreMatrix, TextCatConfig, TextCategorizer, TEXTCAT,
};
use crate::ml::tokenizer::Tokenizer;

/// Language codes this backend can build a blank pipeline for.
const SUPPORTED_LANGUAGES: &[&str] = &["en"];

/// Default SGD step size.
pub const DEFAULT_LEARN_RATE: f32 = 0.05;

/// Floor for probabilities inside the log of the loss.
const PROB_FLOOR: f32 = 1e-7;

// ─── BowTextCategorizer ───────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowTextCategorizer {
    config:  TextCatConfig,
    labels:  Vec<String>,
    /// Column of `weights` for every token seen in training
    vocab:   BTreeMap<String, usize>,
    weights: Array2<f32>, // [labels, vocab]
    bias:    Array1<f32>, // [labels]
}

impl BowTextCategorizer {
    fn new(config: TextCatConfig) -> Self {
        Self {
            config,
            labels:  Vec::new(),
            vocab:   BTreeMap::new(),
            weights: Array2::zeros((0, 0)),
            bias:    Array1::zeros(0),
        }
    }

    /// Bag-of-words vector for `tokens`, each known token counting `scale`.
    fn counts(&self, tokens: &[String], scale: f32) -> Array1<f32> {
        let mut counts = Array1::zeros(self.vocab.len());
        for token in tokens {
            if let Some(&col) = self.vocab.get(token) {
                counts[col] += scale;
            }
        }
        counts
    }

    fn logits(&self, counts: &Array1<f32>) -> Array1<f32> {
        self.weights.dot(counts) + &self.bias
    }

    fn activate(&self, logits: Array1<f32>) -> Array1<f32> {
        if self.config.exclusive_classes {
            softmax(logits)
        } else {
            logits.mapv_into(sigmoid)
        }
    }

    /// Give every unseen token a zero column.
    fn grow_vocab<'a>(&mut self, tokens: impl IntoIterator<Item = &'a String>) {
        let before = self.vocab.len();
        for token in tokens {
            let next = self.vocab.len();
            self.vocab.entry(token.clone()).or_insert(next);
        }
        if self.vocab.len() > before {
            self.weights = resized(&self.weights, (self.labels.len(), self.vocab.len()));
        }
    }

    fn reset_weights(&mut self) {
        self.vocab.clear();
        self.weights = Array2::zeros((self.labels.len(), 0));
        self.bias    = Array1::zeros(self.labels.len());
    }
}

impl TextCategorizer for BowTextCategorizer {
    fn config(&self) -> &TextCatConfig {
        &self.config
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn add_label(&mut self, label: &str) -> Result<(), ModelConstructionError> {
        if self.labels.iter().any(|l| l == label) {
            return Err(ModelConstructionError::DuplicateLabel(label.to_string()));
        }
        self.labels.push(label.to_string());
        self.weights = resized(&self.weights, (self.labels.len(), self.vocab.len()));
        self.bias    = self.bias.iter().copied().chain([0.0]).collect();
        Ok(())
    }

    fn predict(&self, docs: &[Doc]) -> Result<ScoreMatrix, ClassifierError> {
        if self.labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }
        let rows = docs
            .iter()
            .map(|doc| self.activate(self.logits(&self.counts(&doc.tokens, 1.0))).to_vec())
            .collect();
        Ok(ScoreMatrix::new(rows))
    }
}

// ─── BowOptimizer ─────────────────────────────────────────────────────────────
/// Plain SGD plus the RNG that drives dropout.
#[derive(Debug, Clone)]
pub struct BowOptimizer {
    pub learn_rate: f32,
    rng:            StdRng,
}

// ─── BowLanguage ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowLanguage {
    lang:      String,
    tokenizer: Tokenizer,
    textcat:   Option<BowTextCategorizer>,
}

impl Language for BowLanguage {
    type TextCat   = BowTextCategorizer;
    type Optimizer = BowOptimizer;

    fn blank(lang: &str) -> Result<Self, ModelConstructionError> {
        if !SUPPORTED_LANGUAGES.contains(&lang) {
            return Err(ModelConstructionError::UnknownLanguage(lang.to_string()));
        }
        Ok(Self {
            lang:      lang.to_string(),
            tokenizer: Tokenizer::new(),
            textcat:   None,
        })
    }

    fn add_textcat(
        &mut self,
        config: TextCatConfig,
    ) -> Result<&mut BowTextCategorizer, ModelConstructionError> {
        if self.textcat.is_some() {
            return Err(ModelConstructionError::DuplicatePipe(TEXTCAT.to_string()));
        }
        if config.architecture != Architecture::Bow {
            return Err(ModelConstructionError::UnsupportedArchitecture(
                config.architecture.to_string(),
            ));
        }
        Ok(self.textcat.insert(BowTextCategorizer::new(config)))
    }

    fn has_pipe(&self, name: &str) -> bool {
        name == TEXTCAT && self.textcat.is_some()
    }

    fn get_pipe(&self, name: &str) -> Option<&BowTextCategorizer> {
        if name == TEXTCAT {
            self.textcat.as_ref()
        } else {
            None
        }
    }

    fn tokenize(&self, text: &str) -> Result<Doc, ClassifierError> {
        self.tokenizer.tokenize(text)
    }

    fn begin_training(&mut self, rng: &mut StdRng) -> Result<BowOptimizer, ClassifierError> {
        let textcat = self
            .textcat
            .as_mut()
            .ok_or_else(|| ClassifierError::MissingPipe(TEXTCAT.to_string()))?;
        if textcat.labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }
        textcat.reset_weights();
        tracing::debug!("'{}' textcat reset for {} labels", self.lang, textcat.labels.len());

        Ok(BowOptimizer {
            learn_rate: DEFAULT_LEARN_RATE,
            rng:        StdRng::seed_from_u64(rng.gen()),
        })
    }

    fn update(
        &mut self,
        texts:     &[String],
        labels:    &[LabelRecord],
        optimizer: &mut BowOptimizer,
        dropout:   f32,
        losses:    &mut Losses,
    ) -> Result<(), ClassifierError> {
        if !(0.0..1.0).contains(&dropout) {
            return Err(ClassifierError::InvalidDropout(dropout));
        }
        if texts.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch { texts: texts.len(), labels: labels.len() });
        }
        let textcat = self
            .textcat
            .as_mut()
            .ok_or_else(|| ClassifierError::MissingPipe(TEXTCAT.to_string()))?;

        // [batch, labels], columns in label registration order
        let truth = truth_matrix(&textcat.labels, labels)?;

        // Decide which token occurrences survive dropout
        let mut kept: Vec<Vec<String>> = Vec::with_capacity(texts.len());
        for text in texts {
            let doc = self.tokenizer.tokenize(text)?;
            kept.push(
                doc.tokens
                    .into_iter()
                    .filter(|_| optimizer.rng.gen::<f32>() >= dropout)
                    .collect(),
            );
        }
        textcat.grow_vocab(kept.iter().flatten());

        let scale         = 1.0 / (1.0 - dropout);
        let exclusive     = textcat.config.exclusive_classes;
        let mut d_weights = Array2::<f32>::zeros(textcat.weights.raw_dim());
        let mut d_bias    = Array1::<f32>::zeros(textcat.bias.raw_dim());
        let mut loss      = 0.0f32;

        for (tokens, truth) in kept.iter().zip(truth.rows()) {
            let counts = textcat.counts(tokens, scale);
            let scores = textcat.activate(textcat.logits(&counts));

            loss += cross_entropy(&scores, &truth, exclusive);

            let d_logits = &scores - &truth;
            d_weights += &outer(&d_logits, &counts);
            d_bias    += &d_logits;
        }

        if !texts.is_empty() {
            let step = optimizer.learn_rate / texts.len() as f32;
            textcat.weights.scaled_add(-step, &d_weights);
            textcat.bias.scaled_add(-step, &d_bias);
        }

        *losses.entry(TEXTCAT.to_string()).or_insert(0.0) += loss;
        tracing::trace!("textcat update: {} examples, loss={:.6}", texts.len(), loss);
        Ok(())
    }
}

/// One row per record, 1.0 where the record marks the label true.
fn truth_matrix(labels: &[String], records: &[LabelRecord]) -> Result<Array2<f32>, ClassifierError> {
    let mut truth = Array2::zeros((records.len(), labels.len()));
    for (i, record) in records.iter().enumerate() {
        for (j, label) in labels.iter().enumerate() {
            let value = record
                .get(label)
                .ok_or_else(|| ClassifierError::UnknownLabel(label.clone()))?;
            truth[[i, j]] = if value { 1.0 } else { 0.0 };
        }
    }
    Ok(truth)
}

/// `w` copied into the top-left corner of a zero matrix of shape `dim`.
fn resized(w: &Array2<f32>, dim: (usize, usize)) -> Array2<f32> {
    let mut out = Array2::zeros(dim);
    out.slice_mut(s![..w.nrows(), ..w.ncols()]).assign(w);
    out
}

fn outer(a: &Array1<f32>, b: &Array1<f32>) -> Array2<f32> {
    a.view().insert_axis(Axis(1)).dot(&b.view().insert_axis(Axis(0)))
}

fn softmax(logits: Array1<f32>) -> Array1<f32> {
    let max  = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps = logits.mapv_into(|z| (z - max).exp());
    let sum  = exps.sum();
    exps / sum
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

fn cross_entropy(scores: &Array1<f32>, truth: &ArrayView1<f32>, exclusive: bool) -> f32 {
    let p   = scores.mapv(|p| p.clamp(PROB_FLOOR, 1.0 - PROB_FLOOR));
    let hit = truth * &p.mapv(f32::ln);
    if exclusive {
        -hit.sum()
    } else {
        let miss = truth.mapv(|t| 1.0 - t) * &p.mapv(|p| (1.0 - p).ln());
        -(hit + &miss).sum()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::{NEGATIVE, POSITIVE};
    use crate::infra::seed::fix_random_seed;

    const BOW: TextCatConfig = TextCatConfig { exclusive_classes: true, architecture: Architecture::Bow };

    fn model() -> BowLanguage {
        let mut nlp = BowLanguage::blank("en").unwrap();
        let textcat = nlp.add_textcat(BOW).unwrap();
        textcat.add_label(NEGATIVE).unwrap();
        textcat.add_label(POSITIVE).unwrap();
        nlp
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(matches!(
            BowLanguage::blank("tlh"),
            Err(ModelConstructionError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_only_bow_architecture() {
        let mut nlp = BowLanguage::blank("en").unwrap();
        let cnn     = TextCatConfig { architecture: Architecture::SimpleCnn, ..BOW };
        assert!(matches!(
            nlp.add_textcat(cnn),
            Err(ModelConstructionError::UnsupportedArchitecture(_))
        ));
        assert!(!nlp.has_pipe(TEXTCAT));
    }

    #[test]
    fn test_duplicate_pipe_and_label() {
        let mut nlp = model();
        assert!(matches!(nlp.add_textcat(BOW), Err(ModelConstructionError::DuplicatePipe(_))));

        let mut textcat = BowTextCategorizer::new(BOW);
        textcat.add_label(POSITIVE).unwrap();
        assert!(textcat.add_label(POSITIVE).is_err());
    }

    #[test]
    fn test_begin_training_needs_labels() {
        let mut nlp = BowLanguage::blank("en").unwrap();
        let mut rng = fix_random_seed(1);
        assert!(matches!(nlp.begin_training(&mut rng), Err(ClassifierError::MissingPipe(_))));

        nlp.add_textcat(BOW).unwrap();
        assert!(matches!(nlp.begin_training(&mut rng), Err(ClassifierError::NoLabels)));
    }

    #[test]
    fn test_untrained_scores_are_uniform() {
        let mut nlp = model();
        nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let docs   = vec![nlp.tokenize("anything at all").unwrap()];
        let scores = nlp.get_pipe(TEXTCAT).unwrap().predict(&docs).unwrap();
        assert_eq!(scores.rows()[0], vec![0.5, 0.5]);
    }

    #[test]
    fn test_training_separates_classes() {
        let mut nlp = model();
        let mut rng = fix_random_seed(1);
        let mut opt = nlp.begin_training(&mut rng).unwrap();

        let texts  = vec!["great food".to_string(), "awful food".to_string()];
        let labels = vec![LabelRecord::from_sentiment(true), LabelRecord::from_sentiment(false)];
        let mut losses = Losses::new();
        for _ in 0..50 {
            nlp.update(&texts, &labels, &mut opt, 0.0, &mut losses).unwrap();
        }

        let docs: Vec<Doc> = texts.iter().map(|t| nlp.tokenize(t).unwrap()).collect();
        let predicted = nlp.get_pipe(TEXTCAT).unwrap().predict(&docs).unwrap().argmax_rows();
        assert_eq!(predicted, vec![1, 0]);
        assert!(losses[TEXTCAT] > 0.0);
    }

    #[test]
    fn test_weights_track_vocab_and_labels() {
        let mut nlp = model();
        let mut opt = nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let texts   = vec!["great food".to_string(), "awful food!".to_string()];
        let labels  = vec![LabelRecord::from_sentiment(true), LabelRecord::from_sentiment(false)];
        nlp.update(&texts, &labels, &mut opt, 0.0, &mut Losses::new()).unwrap();

        let textcat = nlp.get_pipe(TEXTCAT).unwrap();
        assert_eq!(textcat.vocab.len(), 4);
        assert_eq!(textcat.weights.dim(), (2, 4));
        assert_eq!(textcat.bias.len(), 2);
        assert_eq!(textcat.vocab["great"], 0);
        assert_eq!(textcat.vocab["!"], 3);

        // Shared token "food" gets opposite pushes that cancel out
        let food = textcat.weights.column(textcat.vocab["food"]);
        assert!(food.iter().all(|w| w.abs() < 1e-6));
    }

    #[test]
    fn test_label_added_after_training_gets_zero_column() {
        let mut nlp = model();
        let mut opt = nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let texts   = vec!["great".to_string()];
        let labels  = vec![LabelRecord::from_sentiment(true)];
        nlp.update(&texts, &labels, &mut opt, 0.0, &mut Losses::new()).unwrap();

        let textcat = nlp.textcat.as_mut().unwrap();
        let before  = textcat.weights.clone();
        textcat.add_label("NEUTRAL").unwrap();
        assert_eq!(textcat.weights.dim(), (3, 1));
        assert_eq!(textcat.weights.row(0), before.row(0));
        assert_eq!(textcat.weights[[2, 0]], 0.0);
        assert_eq!(textcat.bias[2], 0.0);
    }

    #[test]
    fn test_unseen_tokens_are_ignored() {
        let mut nlp = model();
        let mut opt = nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let texts   = vec!["great".to_string()];
        let labels  = vec![LabelRecord::from_sentiment(true)];
        nlp.update(&texts, &labels, &mut opt, 0.0, &mut Losses::new()).unwrap();

        let docs = vec![nlp.tokenize("").unwrap(), nlp.tokenize("never seen before").unwrap()];
        let rows = nlp.get_pipe(TEXTCAT).unwrap().predict(&docs).unwrap();
        assert_eq!(rows.rows()[0], rows.rows()[1]);
    }

    #[test]
    fn test_update_rejects_bad_input() {
        let mut nlp = model();
        let mut opt = nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let mut losses = Losses::new();

        let texts = vec!["x".to_string()];
        assert!(matches!(
            nlp.update(&texts, &[], &mut opt, 0.2, &mut losses),
            Err(ClassifierError::LengthMismatch { texts: 1, labels: 0 })
        ));

        let labels = vec![LabelRecord::from_sentiment(true)];
        assert!(matches!(
            nlp.update(&texts, &labels, &mut opt, 1.0, &mut losses),
            Err(ClassifierError::InvalidDropout(_))
        ));
    }

    #[test]
    fn test_unknown_label_in_textcat() {
        let mut nlp = BowLanguage::blank("en").unwrap();
        nlp.add_textcat(BOW).unwrap().add_label("NEUTRAL").unwrap();
        let mut opt    = nlp.begin_training(&mut fix_random_seed(1)).unwrap();
        let mut losses = Losses::new();

        let err = nlp
            .update(&["x".to_string()], &[LabelRecord::from_sentiment(true)], &mut opt, 0.0, &mut losses)
            .unwrap_err();
        assert_eq!(err, ClassifierError::UnknownLabel("NEUTRAL".to_string()));
    }

    #[test]
    fn test_same_seed_same_weights() {
        let run = || {
            let mut nlp = model();
            let mut opt = nlp.begin_training(&mut fix_random_seed(9)).unwrap();
            let texts   = vec!["tasty and cheap".to_string(), "slow rude service".to_string()];
            let labels  = vec![LabelRecord::from_sentiment(true), LabelRecord::from_sentiment(false)];
            let mut losses = Losses::new();
            nlp.update(&texts, &labels, &mut opt, 0.2, &mut losses).unwrap();
            (nlp, losses)
        };
        assert_eq!(run(), run());
    }
}
