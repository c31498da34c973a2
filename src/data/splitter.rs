// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples once and splits them into two sets:
//   - Training set:   what every check trains on
//   - Validation set: what predict/evaluate checks score
//
// Why must the shuffle be seeded?
//   Grading compares a learner's output against an oracle run.
//   Both runs slice the same partitions (e.g. validation rows
//   20..30), so the ordering has to be identical every time
//   the lesson starts. A thread_rng shuffle would give each
//   session different partitions.
//
// Split index = floor(total × fraction). Rows before the index
// are training rows, the rest validation. Nothing is dropped.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::domain::error::DataLoadError;

/// Shuffle `samples` with `rng` and split into (train, validation).
///
/// # Example
/// ```
/// use textcat_grader::data::splitter::split_train_val;
/// use textcat_grader::infra::seed::fix_random_seed;
///
/// let items: Vec<u32> = (0..10).collect();
/// let (train, val) = split_train_val(items, 0.8, &mut fix_random_seed(7)).unwrap();
/// assert_eq!((train.len(), val.len()), (8, 2));
/// ```
pub fn split_train_val<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    rng:            &mut StdRng,
) -> Result<(Vec<T>, Vec<T>), DataLoadError> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(DataLoadError::InvalidSplit(train_fraction));
    }

    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).floor() as usize;
    let split_at = split_at.min(total);

    // After this: samples = [0..split_at], val = [split_at..total]
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    Ok((samples, val))
}
