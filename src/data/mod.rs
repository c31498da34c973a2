// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the review CSV and a training batch.
//
//   reviews.csv
//       │
//       ▼
//   CsvLoader         → reads rows into Examples
//       │
//       ▼
//   split_train_val   → seeded shuffle, floor(n × split) cut
//       │
//       ▼
//   Partition × 2     → texts + label records (train, validation)
//       │
//       ▼
//   minibatch         → fixed-size batches for Language::update
//
// Reference: Rust Book §13 (Iterators and Closures)

use crate::domain::error::DataLoadError;
use crate::domain::example::{Example, Partition};
use crate::infra::seed::fix_random_seed;

/// Reads labelled reviews from a CSV file
pub mod loader;

/// Seeded shuffle and train/validation split
pub mod splitter;

/// Fixed-size batching of (text, label) pairs
pub mod batcher;

/// Load the dataset and split it into (train, validation).
///
/// The shuffle uses `shuffle_seed`, so every call with the same
/// file and seed produces the same partitions in the same order.
pub fn load_data(
    path:         &str,
    split:        f64,
    shuffle_seed: u64,
) -> Result<(Partition, Partition), DataLoadError> {
    let examples = loader::CsvLoader::new(path).load_all()?;
    split_examples(examples, split, shuffle_seed)
}

/// Split already-loaded examples the same way `load_data` does.
pub fn split_examples(
    examples:     Vec<Example>,
    split:        f64,
    shuffle_seed: u64,
) -> Result<(Partition, Partition), DataLoadError> {
    let mut rng      = fix_random_seed(shuffle_seed);
    let (train, val) = splitter::split_train_val(examples, split, &mut rng)?;
    Ok((Partition::from_examples(train), Partition::from_examples(val)))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn ten_rows() -> Vec<Example> {
        (0..10).map(|i| Example::new(format!("row {i}"), i % 3 == 0)).collect()
    }

    #[test]
    fn test_ten_rows_split_eight_two() {
        let (train, val) = split_examples(ten_rows(), 0.8, 7).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
    }

    #[test]
    fn test_labels_follow_their_texts() {
        let (train, val) = split_examples(ten_rows(), 0.8, 7).unwrap();
        for p in [&train, &val] {
            for (text, label) in p.texts().iter().zip(p.labels()) {
                let i: usize = text.trim_start_matches("row ").parse().unwrap();
                assert_eq!(label.is_positive(), i % 3 == 0);
                assert_ne!(label.is_positive(), label.is_negative());
            }
        }
    }

    #[test]
    fn test_load_data_from_file() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "text,sentiment").unwrap();
        for i in 0..10 {
            writeln!(f, "review {i},{}", i % 2).unwrap();
        }

        let path         = f.path().to_string_lossy().to_string();
        let (train, val) = load_data(&path, 0.8, 7).unwrap();
        assert_eq!(train.len() + val.len(), 10);

        let (again, _) = load_data(&path, 0.8, 7).unwrap();
        assert_eq!(train, again);
    }
}
