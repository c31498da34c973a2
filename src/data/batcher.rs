// ============================================================
// Layer 4 — Minibatcher
// ============================================================
// Cuts a sequence of (text, label) pairs into fixed-size
// batches for training. Every batch has exactly `size` pairs
// except possibly the last, which holds whatever is left.
//
//   10 pairs, size 4 → [4, 4, 2]
//
// Batches also "unzip" into the parallel texts/labels slices
// that Language::update takes.
//
// Reference: Rust Book §13 (Iterators)
//            std::slice::Chunks

use crate::domain::example::LabelRecord;

/// One training batch as parallel vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texts:  Vec<String>,
    pub labels: Vec<LabelRecord>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Split `pairs` into batches of `size`, preserving order.
///
/// A `size` of zero is treated as one so the loop always advances.
pub fn minibatch(pairs: &[(String, LabelRecord)], size: usize) -> impl Iterator<Item = Batch> + '_ {
    pairs.chunks(size.max(1)).map(|chunk| {
        let (texts, labels) = chunk.iter().cloned().unzip();
        Batch { texts, labels }
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(n: usize) -> Vec<(String, LabelRecord)> {
        (0..n)
            .map(|i| (format!("review {i}"), LabelRecord::from_sentiment(i % 2 == 0)))
            .collect()
    }

    #[test]
    fn test_batch_sizes() {
        let data  = pairs(10);
        let sizes: Vec<usize> = minibatch(&data, 4).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn test_order_preserved_and_unzipped() {
        let data    = pairs(3);
        let batches: Vec<Batch> = minibatch(&data, 8).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].texts, vec!["review 0", "review 1", "review 2"]);
        assert!(batches[0].labels[0].is_positive());
        assert!(batches[0].labels[1].is_negative());
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        assert_eq!(minibatch(&[], 8).count(), 0);
    }

    #[test]
    fn test_zero_size_does_not_hang() {
        let data = pairs(2);
        assert_eq!(minibatch(&data, 0).count(), 2);
    }
}
