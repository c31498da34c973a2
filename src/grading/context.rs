// ============================================================
// Grading Layer — Grading Context
// ============================================================
// The shared, read-only state every check routine needs:
//
//   - the train and validation partitions
//   - the seed pinned before each learner run and oracle run
//   - how many training pairs a check trains on
//
// Lifecycle: built exactly once when a lesson session starts
// (GradingContext::load reads the CSV a single time), then
// passed by reference into every check. Nothing mutates it;
// checks clone the slices they need to shuffle.
//
// Reference: Rust Book §15 (Smart Pointers — shared ownership)
//            Rust Book §5 (Method Syntax / builders)

use rand::rngs::StdRng;

use crate::data::load_data;
use crate::domain::error::DataLoadError;
use crate::domain::example::{LabelRecord, Partition};
use crate::infra::config::HarnessConfig;
use crate::infra::seed::fix_random_seed;

/// Seed pinned before every grading run unless configured otherwise.
pub const DEFAULT_GRADING_SEED: u64 = 1;

/// Training pairs each check trains on unless configured otherwise.
pub const DEFAULT_TRAIN_SUBSET: usize = 1000;

#[derive(Debug, Clone)]
pub struct GradingContext {
    train:        Partition,
    val:          Partition,
    grading_seed: u64,
    train_subset: usize,
}

impl GradingContext {
    pub fn new(train: Partition, val: Partition) -> Self {
        Self {
            train,
            val,
            grading_seed: DEFAULT_GRADING_SEED,
            train_subset: DEFAULT_TRAIN_SUBSET,
        }
    }

    /// Read the dataset once and build the context from a config.
    pub fn load(cfg: &HarnessConfig) -> Result<Self, DataLoadError> {
        let (train, val) = load_data(&cfg.data_path, cfg.split, cfg.shuffle_seed)?;
        tracing::info!(
            "Grading context ready: {} train, {} validation",
            train.len(),
            val.len()
        );
        Ok(Self::new(train, val)
            .with_grading_seed(cfg.grading_seed)
            .with_train_subset(cfg.train_subset))
    }

    pub fn with_grading_seed(mut self, seed: u64) -> Self {
        self.grading_seed = seed;
        self
    }

    pub fn with_train_subset(mut self, n: usize) -> Self {
        self.train_subset = n;
        self
    }

    pub fn train(&self) -> &Partition {
        &self.train
    }

    pub fn val(&self) -> &Partition {
        &self.val
    }

    /// A fresh RNG at the grading seed. Call once per run.
    pub fn pinned_rng(&self) -> StdRng {
        fix_random_seed(self.grading_seed)
    }

    /// An owned copy of the training pairs a check trains on.
    pub fn training_pairs(&self) -> Vec<(String, LabelRecord)> {
        self.train.zipped_prefix(self.train_subset)
    }
}
