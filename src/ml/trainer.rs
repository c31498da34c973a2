// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train + validation loop for the `train` command.
//
// Per epoch:
//   1. shuffle the whole training partition (pinned RNG)
//   2. one update per minibatch with the configured dropout
//   3. accuracy on the validation partition
//   4. metrics row + checkpoint; best epoch is remembered
//
// The optimizer is created once, so later epochs continue from
// the weights of earlier ones.
//
// Reference: Rust Book §13 (Iterators)

use anyhow::{Context, Result};

use crate::domain::traits::{Language, TEXTCAT};
use crate::grading::context::GradingContext;
use crate::infra::checkpoint::{BestEpoch, CheckpointManager};
use crate::infra::config::HarnessConfig;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::bow::BowLanguage;
use crate::ml::factory::create_model;
use crate::ml::reference::{evaluate, train_with_dropout};

/// What a finished run reports back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    pub epochs: Vec<EpochMetrics>,
    pub best:   Option<BestEpoch>,
}

pub fn run_training(
    cfg:     &HarnessConfig,
    ctx:     &GradingContext,
    ckpt:    &CheckpointManager,
    metrics: &MetricsLogger,
) -> Result<TrainingSummary> {
    let mut model: BowLanguage = create_model().context("Cannot build the classifier")?;
    let mut rng = ctx.pinned_rng();

    let mut optimizer = model.begin_training(&mut rng)?;
    optimizer.learn_rate = cfg.learn_rate;

    let mut train_data = ctx.train().zipped_prefix(ctx.train().len());
    let (val_texts, val_labels) = (ctx.val().texts(), ctx.val().labels());

    tracing::info!(
        "Training for {} epochs on {} examples (batch size {}, dropout {})",
        cfg.epochs,
        train_data.len(),
        cfg.batch_size,
        cfg.dropout
    );

    let mut summary = TrainingSummary { epochs: Vec::with_capacity(cfg.epochs), best: None };

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let losses = train_with_dropout(
            &mut model,
            &mut train_data,
            &mut optimizer,
            cfg.batch_size,
            cfg.dropout,
            &mut rng,
        )?;
        let train_loss = losses.get(TEXTCAT).copied().unwrap_or_default() as f64;

        let val_accuracy = evaluate(&model, val_texts, val_labels)?;

        let m = EpochMetrics::new(epoch, train_loss, val_accuracy);
        metrics.log(&m)?;
        ckpt.save_model(&model, epoch)?;

        let best_so_far = summary.best.as_ref().map(|b| b.val_accuracy);
        let improved = m.is_improvement(best_so_far);
        if improved {
            let best = BestEpoch { epoch, val_accuracy };
            ckpt.mark_best(&best)?;
            summary.best = Some(best);
        }

        tracing::info!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_accuracy={:.4}{}",
            epoch,
            cfg.epochs,
            train_loss,
            val_accuracy,
            if improved { " | best" } else { "" },
        );
        summary.epochs.push(m);
    }

    if let Some(best) = &summary.best {
        tracing::info!(
            "Training complete. Best epoch {} with val_accuracy={:.4}",
            best.epoch,
            best.val_accuracy
        );
    }
    Ok(summary)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::split_examples;
    use crate::domain::example::Example;

    fn toy_context() -> GradingContext {
        let examples: Vec<Example> = (0..40)
            .map(|i| {
                if i % 2 == 0 {
                    Example::new(format!("great food, loved it {i}"), true)
                } else {
                    Example::new(format!("awful service, hated it {i}"), false)
                }
            })
            .collect();
        let (train, val) = split_examples(examples, 0.8, 7).unwrap();
        GradingContext::new(train, val)
    }

    #[test]
    fn test_run_writes_metrics_and_best_checkpoint() {
        let dir     = tempfile::tempdir().unwrap();
        let ckpt    = CheckpointManager::new(dir.path()).unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let cfg     = HarnessConfig { epochs: 3, learn_rate: 0.5, ..HarnessConfig::default() };

        let summary = run_training(&cfg, &toy_context(), &ckpt, &metrics).unwrap();

        assert_eq!(summary.epochs.len(), 3);
        let best = summary.best.unwrap();
        assert_eq!(ckpt.best_epoch().unwrap(), best);
        assert!(ckpt.load_best_model().is_ok());

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_separable_data_is_learned() {
        let dir     = tempfile::tempdir().unwrap();
        let ckpt    = CheckpointManager::new(dir.path()).unwrap();
        let metrics = MetricsLogger::new(dir.path()).unwrap();
        let cfg     = HarnessConfig { epochs: 5, learn_rate: 0.5, ..HarnessConfig::default() };

        let summary = run_training(&cfg, &toy_context(), &ckpt, &metrics).unwrap();
        assert!(summary.best.unwrap().val_accuracy > 0.5);
    }

    #[test]
    fn test_same_seed_same_run() {
        let cfg = HarnessConfig { epochs: 2, ..HarnessConfig::default() };
        let run = || {
            let dir     = tempfile::tempdir().unwrap();
            let ckpt    = CheckpointManager::new(dir.path()).unwrap();
            let metrics = MetricsLogger::new(dir.path()).unwrap();
            run_training(&cfg, &toy_context(), &ckpt, &metrics).unwrap()
        };
        assert_eq!(run(), run());
    }
}
