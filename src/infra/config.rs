// ============================================================
// Layer 6 — Harness Configuration
// ============================================================
// Every tunable of a grading or training run in one place.
// Serialisable so it can be loaded from a JSON file with
// --config and saved next to checkpoints, like the rest of
// the app's config handling.
//
// Defaults reproduce the lesson exactly:
//   split 0.8, shuffle seed 7, grading seed 1,
//   1000 training pairs per check, batch size 8, dropout 0.2
//
// Reference: serde documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// CSV file with `text` and `sentiment` columns
    pub data_path:      String,
    /// Fraction of shuffled rows that go to training
    pub split:          f64,
    /// Seed for the one-time dataset shuffle
    pub shuffle_seed:   u64,
    /// Seed pinned before every learner run and oracle run
    pub grading_seed:   u64,
    /// Number of training pairs each check trains on
    pub train_subset:   usize,
    pub batch_size:     usize,
    pub dropout:        f32,
    pub learn_rate:     f32,
    /// Passes over the training partition for the `train` command
    pub epochs:         usize,
    pub tutorial_id:    u32,
    pub checkpoint_dir: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/yelp_ratings.csv".to_string(),
            split:          0.8,
            shuffle_seed:   7,
            grading_seed:   1,
            train_subset:   1000,
            batch_size:     8,
            dropout:        0.2,
            learn_rate:     0.05,
            epochs:         5,
            tutorial_id:    262,
            checkpoint_dir: "checkpoints".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.split) {
            bail!("split must be within [0, 1], got {}", self.split);
        }
        if self.batch_size == 0 {
            bail!("batch_size must be at least 1");
        }
        if !(0.0..1.0).contains(&self.dropout) {
            bail!("dropout must be within [0, 1), got {}", self.dropout);
        }
        if self.learn_rate <= 0.0 {
            bail!("learn_rate must be positive, got {}", self.learn_rate);
        }
        Ok(())
    }
}
