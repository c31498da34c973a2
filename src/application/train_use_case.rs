// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a full training run in order:
//
//   Step 1: Load and split the CSV    (Layer 4 - data, via context)
//   Step 2: Prepare checkpoint dir    (Layer 6 - infra)
//   Step 3: Save config               (Layer 6 - infra)
//   Step 4: Run the epoch loop        (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};

use crate::grading::context::GradingContext;
use crate::infra::{checkpoint::CheckpointManager, config::HarnessConfig, metrics::MetricsLogger};
use crate::ml::trainer::{run_training, TrainingSummary};

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: HarnessConfig,
}

impl TrainUseCase {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingSummary> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset once ────────────────────────────────────
        let ctx = GradingContext::load(cfg)
            .with_context(|| format!("Cannot load training data from '{}'", cfg.data_path))?;

        self.execute_with(&ctx)
    }

    /// Train on an already-built context.
    pub fn execute_with(&self, ctx: &GradingContext) -> Result<TrainingSummary> {
        let cfg = &self.config;

        // ── Step 2: Checkpoint + metrics outputs ──────────────────────────────
        let ckpt    = CheckpointManager::new(&cfg.checkpoint_dir)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 3: Save config alongside the checkpoints ─────────────────────
        ckpt.save_config(cfg)?;

        // ── Step 4: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, ctx, &ckpt, &metrics)
    }
}
