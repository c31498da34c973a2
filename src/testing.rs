// ============================================================
// Test Support — Stub Classifier Backend
// ============================================================
// Test doubles shared by the unit tests.
//
// StubLanguage implements the classifier capability without any
// learning. Its behaviour is simple but sensitive to everything
// the checks care about:
//   - loss depends on batch composition, order and dropout, so a
//     train function with the wrong batch size, no shuffle, or the
//     wrong dropout produces a different loss map
//   - scores depend only on the text ("good" → POSITIVE)
//
// Reference: Rust Book §11 (Writing Automated Tests)
//            Rust Book §10 (Traits)

use rand::rngs::StdRng;
use rand::Rng;

use crate::domain::error::{ClassifierError, ModelConstructionError};
use crate::domain::example::{Example, LabelRecord, Partition};
use crate::domain::traits::{
    Doc, Language, Losses, ScoreMatrix, TextCatConfig, TextCategorizer, TEXTCAT,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StubTextCat {
    pub config: TextCatConfig,
    pub labels: Vec<String>,
}

impl TextCategorizer for StubTextCat {
    fn config(&self) -> &TextCatConfig {
        &self.config
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn add_label(&mut self, label: &str) -> Result<(), ModelConstructionError> {
        self.labels.push(label.to_string());
        Ok(())
    }

    fn predict(&self, docs: &[Doc]) -> Result<ScoreMatrix, ClassifierError> {
        let rows = docs
            .iter()
            .map(|d| {
                if d.tokens.iter().any(|t| t == "good") {
                    vec![0.1, 0.9]
                } else {
                    vec![0.9, 0.1]
                }
            })
            .collect();
        Ok(ScoreMatrix::new(rows))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StubLanguage {
    pub textcat: Option<StubTextCat>,
}

/// Optimizer for the stub: a salt drawn from the pinned RNG.
#[derive(Debug)]
pub struct StubOptimizer {
    pub salt: f32,
}

impl Language for StubLanguage {
    type TextCat   = StubTextCat;
    type Optimizer = StubOptimizer;

    fn blank(_lang: &str) -> Result<Self, ModelConstructionError> {
        Ok(Self::default())
    }

    fn add_textcat(&mut self, config: TextCatConfig) -> Result<&mut StubTextCat, ModelConstructionError> {
        Ok(self.textcat.insert(StubTextCat { config, labels: Vec::new() }))
    }

    fn has_pipe(&self, name: &str) -> bool {
        name == TEXTCAT && self.textcat.is_some()
    }

    fn get_pipe(&self, name: &str) -> Option<&StubTextCat> {
        if name == TEXTCAT {
            self.textcat.as_ref()
        } else {
            None
        }
    }

    fn tokenize(&self, text: &str) -> Result<Doc, ClassifierError> {
        Ok(Doc {
            text:   text.to_string(),
            tokens: text.split_whitespace().map(str::to_string).collect(),
        })
    }

    fn begin_training(&mut self, rng: &mut StdRng) -> Result<StubOptimizer, ClassifierError> {
        Ok(StubOptimizer { salt: rng.gen_range(0.0..1.0) })
    }

    fn update(
        &mut self,
        texts:     &[String],
        labels:    &[LabelRecord],
        optimizer: &mut StubOptimizer,
        dropout:   f32,
        losses:    &mut Losses,
    ) -> Result<(), ClassifierError> {
        if texts.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch { texts: texts.len(), labels: labels.len() });
        }
        let batch_loss: f32 = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (i + 1) as f32 * t.len() as f32)
            .sum();
        *losses.entry(TEXTCAT.to_string()).or_insert(0.0) +=
            batch_loss * (1.0 + dropout) + optimizer.salt;
        Ok(())
    }
}

/// A partition pair with `n_train` / `n_val` rows whose texts
/// alternate between "good" and "bad" reviews.
pub fn partitions(n_train: usize, n_val: usize) -> (Partition, Partition) {
    let rows = |n: usize, offset: usize| {
        (0..n)
            .map(|i| {
                let j = i + offset;
                if j % 2 == 0 {
                    Example::new(format!("good review number {j}"), true)
                } else {
                    Example::new(format!("bad review number {j}"), j % 3 == 0)
                }
            })
            .collect::<Vec<_>>()
    };
    (
        Partition::from_examples(rows(n_train, 0)),
        Partition::from_examples(rows(n_val, n_train)),
    )
}
