// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the bag-of-words model as JSON.
//
// What gets saved:
//   1. model_epoch_{n}.json — the full pipeline after epoch n
//   2. best_epoch.json      — which epoch had the best val accuracy
//   3. harness_config.json  — the config the run used
//
// Only the epoch with the best validation accuracy needs to be
// reloaded later; earlier epochs stay on disk for comparison.
//
// File naming convention:
//   checkpoints/
//     model_epoch_1.json
//     model_epoch_2.json
//     best_epoch.json
//     harness_config.json
//     metrics.csv          (written by MetricsLogger)
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::infra::config::HarnessConfig;
use crate::ml::bow::BowLanguage;

/// Pointer to the best checkpoint so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEpoch {
    pub epoch:        usize,
    pub val_accuracy: f64,
}

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create checkpoint directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Save the pipeline as it stands after `epoch`.
    pub fn save_model(&self, model: &BowLanguage, epoch: usize) -> Result<()> {
        let path = self.model_path(epoch);
        let json = serde_json::to_string(model)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Record `best` as the checkpoint to load for inference.
    pub fn mark_best(&self, best: &BestEpoch) -> Result<()> {
        let path = self.dir.join("best_epoch.json");
        fs::write(&path, serde_json::to_string_pretty(best)?)
            .with_context(|| "Failed to write best_epoch.json")?;
        Ok(())
    }

    pub fn best_epoch(&self) -> Result<BestEpoch> {
        let path = self.dir.join("best_epoch.json");
        let json = fs::read_to_string(&path)
            .with_context(|| "Cannot find 'best_epoch.json'. Have you run 'train' first?")?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load the model from the best recorded epoch.
    pub fn load_best_model(&self) -> Result<BowLanguage> {
        let best = self.best_epoch()?;
        let path = self.model_path(best.epoch);

        tracing::info!(
            "Loading checkpoint from epoch {} (val accuracy {:.4})",
            best.epoch,
            best.val_accuracy
        );

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot load checkpoint '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Checkpoint '{}' is not a valid model", path.display()))
    }

    pub fn save_config(&self, cfg: &HarnessConfig) -> Result<()> {
        let path = self.dir.join("harness_config.json");
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved harness config to '{}'", path.display());
        Ok(())
    }

    fn model_path(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("model_epoch_{epoch}.json"))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::factory::create_model;

    #[test]
    fn test_best_model_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();

        let model: BowLanguage = create_model().unwrap();
        ckpt.save_model(&model, 3).unwrap();
        ckpt.mark_best(&BestEpoch { epoch: 3, val_accuracy: 0.9 }).unwrap();

        assert_eq!(ckpt.best_epoch().unwrap().epoch, 3);
        assert_eq!(ckpt.load_best_model().unwrap(), model);
    }

    #[test]
    fn test_missing_best_pointer() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        let err  = ckpt.load_best_model().unwrap_err();
        assert!(err.to_string().contains("Have you run 'train' first?"));
    }

    #[test]
    fn test_config_saved() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path()).unwrap();
        ckpt.save_config(&HarnessConfig::default()).unwrap();
        assert!(dir.path().join("harness_config.json").exists());
    }
}
