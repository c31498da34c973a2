// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{Context, Result};

use crate::domain::traits::{Language, TextCategorizer, TEXTCAT};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::bow::BowLanguage;

/// A single text's predicted label and the score behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

pub struct Inferencer {
    model: BowLanguage,
}

impl Inferencer {
    pub fn new(model: BowLanguage) -> Self {
        Self { model }
    }

    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let model = ckpt_manager.load_best_model()?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self::new(model))
    }

    pub fn classify(&self, text: &str) -> Result<Classification> {
        let textcat = self
            .model
            .get_pipe(TEXTCAT)
            .context("Checkpoint has no text categorizer")?;

        let doc    = self.model.tokenize(text)?;
        let scores = textcat.predict(std::slice::from_ref(&doc))?;

        let best = scores.argmax_rows().first().copied().context("Classifier returned no scores")?;
        let row  = &scores.rows()[0];
        let label = textcat
            .labels()
            .get(best)
            .cloned()
            .context("Score column has no matching label")?;

        tracing::debug!("'{}' → {} ({:.4})", text, label, row[best]);
        Ok(Classification { label, score: row[best] })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::LabelRecord;
    use crate::domain::traits::Losses;
    use crate::infra::checkpoint::BestEpoch;
    use crate::infra::seed::fix_random_seed;
    use crate::ml::factory::create_model;

    fn trained() -> BowLanguage {
        let mut model: BowLanguage = create_model().unwrap();
        let mut rng = fix_random_seed(1);
        let mut opt = model.begin_training(&mut rng).unwrap();
        opt.learn_rate = 0.5;

        let texts  = vec!["great great".to_string(), "awful awful".to_string()];
        let labels = vec![LabelRecord::from_sentiment(true), LabelRecord::from_sentiment(false)];
        let mut losses = Losses::new();
        for _ in 0..20 {
            model.update(&texts, &labels, &mut opt, 0.0, &mut losses).unwrap();
        }
        model
    }

    #[test]
    fn test_classify_trained_model() {
        let inf = Inferencer::new(trained());
        assert_eq!(inf.classify("great").unwrap().label, "POSITIVE");
        let neg = inf.classify("awful").unwrap();
        assert_eq!(neg.label, "NEGATIVE");
        assert!(neg.score > 0.5);
    }

    #[test]
    fn test_from_checkpoint() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        ckpt.save_model(&trained(), 1).unwrap();
        ckpt.mark_best(&BestEpoch { epoch: 1, val_accuracy: 1.0 }).unwrap();

        let inf = Inferencer::from_checkpoint(&ckpt).unwrap();
        assert_eq!(inf.classify("great").unwrap().label, "POSITIVE");
    }

    #[test]
    fn test_untrained_pipeline_is_rejected() {
        let blank = BowLanguage::blank("en").unwrap();
        assert!(Inferencer::new(blank).classify("anything").is_err());
    }
}
