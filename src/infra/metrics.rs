// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch of
// the `train` command.
//
// Metrics recorded per epoch:
//   - epoch:        the epoch number (1, 2, 3, ...)
//   - train_loss:   textcat loss summed over every batch
//   - val_accuracy: accuracy of the model on the validation set
//
// Output file: checkpoints/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,val_accuracy
//   1,412.530212,0.861000
//   2,251.007813,0.884500
//
// How to read the metrics:
//   - Loss should decrease each epoch (model is learning)
//   - If val_accuracy drops while train_loss keeps falling,
//     the model is overfitting — keep the best epoch instead
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Sum of the textcat loss over all batches of the epoch
    pub train_loss: f64,

    /// Fraction of validation texts classified correctly, in [0, 1]
    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_accuracy: f64) -> Self {
        Self { epoch, train_loss, val_accuracy }
    }

    /// Returns true if this epoch beats the best validation accuracy so far
    pub fn is_improvement(&self, best_val_accuracy: Option<f64>) -> bool {
        best_val_accuracy.map_or(true, |best| self.val_accuracy > best)
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");

        // Header only for a new file, so runs append to one log
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.train_loss, m.val_accuracy)?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_accuracy={:.4}",
            m.epoch,
            m.train_loss,
            m.val_accuracy,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
