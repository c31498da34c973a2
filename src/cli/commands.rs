// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands of the lesson runtime and their flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Flags left unset fall back to the --config file, then to
// HarnessConfig::default().
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::infra::config::HarnessConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the exercises of the lesson
    List,

    /// Show the hint for one exercise
    Hint(ExerciseArgs),

    /// Show the solution for one exercise
    Solution(ExerciseArgs),

    /// Grade every reference solution against its own check
    Verify(DataArgs),

    /// Train the bag-of-words classifier and keep the best epoch
    Train(TrainArgs),

    /// Label a piece of text with the best trained checkpoint
    Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
pub struct ExerciseArgs {
    /// Exercise name, e.g. q_2
    #[arg(long)]
    pub exercise: String,
}

/// Where the reviews come from and how they are split.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// CSV file with `text` and `sentiment` columns
    #[arg(long)]
    pub data_path: Option<String>,

    /// Fraction of rows used for training
    #[arg(long)]
    pub split: Option<f64>,

    /// Seed for the dataset shuffle
    #[arg(long)]
    pub shuffle_seed: Option<u64>,

    /// Seed pinned before each graded run
    #[arg(long)]
    pub grading_seed: Option<u64>,
}

impl DataArgs {
    pub fn apply(self, cfg: &mut HarnessConfig) {
        if let Some(v) = self.data_path    { cfg.data_path = v; }
        if let Some(v) = self.split        { cfg.split = v; }
        if let Some(v) = self.shuffle_seed { cfg.shuffle_seed = v; }
        if let Some(v) = self.grading_seed { cfg.grading_seed = v; }
    }
}

#[derive(Args, Debug, Default)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of full passes through the training data
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Number of examples per update
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Probability of dropping each token during an update
    #[arg(long)]
    pub dropout: Option<f32>,

    /// SGD step size
    #[arg(long)]
    pub learn_rate: Option<f32>,

    /// Directory for checkpoints and metrics.csv
    #[arg(long)]
    pub checkpoint_dir: Option<String>,
}

impl TrainArgs {
    pub fn apply(self, cfg: &mut HarnessConfig) {
        self.data.apply(cfg);
        if let Some(v) = self.epochs         { cfg.epochs = v; }
        if let Some(v) = self.batch_size     { cfg.batch_size = v; }
        if let Some(v) = self.dropout        { cfg.dropout = v; }
        if let Some(v) = self.learn_rate     { cfg.learn_rate = v; }
        if let Some(v) = self.checkpoint_dir { cfg.checkpoint_dir = v; }
    }
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The review text to label
    #[arg(long)]
    pub text: String,

    /// Directory where checkpoints were saved during training
    #[arg(long)]
    pub checkpoint_dir: Option<String>,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flags_keep_config() {
        let mut cfg = HarnessConfig { epochs: 9, ..HarnessConfig::default() };
        TrainArgs::default().apply(&mut cfg);
        assert_eq!(cfg, HarnessConfig { epochs: 9, ..HarnessConfig::default() });
    }

    #[test]
    fn test_flags_override_config() {
        let mut cfg = HarnessConfig::default();
        TrainArgs {
            data: DataArgs { split: Some(0.5), ..DataArgs::default() },
            dropout: Some(0.1),
            ..TrainArgs::default()
        }
        .apply(&mut cfg);
        assert_eq!(cfg.split, 0.5);
        assert_eq!(cfg.dropout, 0.1);
        assert_eq!(cfg.batch_size, 8);
    }
}
