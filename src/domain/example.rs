// ============================================================
// Layer 3 — Labelled Examples and Partitions
// ============================================================
// The data the whole lesson revolves around:
//
//   Example      — one review text with a boolean sentiment
//   LabelRecord  — the label in the shape the classifier expects:
//                    {"cats": {"POSITIVE": true, "NEGATIVE": false}}
//   Partition    — texts plus parallel label records (train or val)
//
// The two category flags are always logical complements, so a
// LabelRecord can only be built from a single sentiment bool.
// Deserialising a record with both (or neither) flag set fails.
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)
//            serde documentation (container attributes)

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Category name for positive sentiment.
pub const POSITIVE: &str = "POSITIVE";

/// Category name for negative sentiment.
pub const NEGATIVE: &str = "NEGATIVE";

// ─── Example ──────────────────────────────────────────────────────────────────
/// One row of the review dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text:      String,
    pub sentiment: bool,
}

impl Example {
    pub fn new(text: impl Into<String>, sentiment: bool) -> Self {
        Self { text: text.into(), sentiment }
    }
}

// ─── LabelRecord ──────────────────────────────────────────────────────────────
/// Exclusive binary category flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cats {
    #[serde(rename = "POSITIVE")]
    positive: bool,
    #[serde(rename = "NEGATIVE")]
    negative: bool,
}

/// Structured ground truth for one example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLabelRecord")]
pub struct LabelRecord {
    cats: Cats,
}

#[derive(Deserialize)]
struct RawLabelRecord {
    cats: Cats,
}

impl TryFrom<RawLabelRecord> for LabelRecord {
    type Error = String;

    fn try_from(raw: RawLabelRecord) -> Result<Self, Self::Error> {
        if raw.cats.positive == raw.cats.negative {
            return Err(format!(
                "exactly one of POSITIVE/NEGATIVE must be true, got POSITIVE={} NEGATIVE={}",
                raw.cats.positive, raw.cats.negative
            ));
        }
        Ok(Self { cats: raw.cats })
    }
}

impl LabelRecord {
    /// Build the record for a sentiment value: true → POSITIVE.
    pub fn from_sentiment(sentiment: bool) -> Self {
        Self {
            cats: Cats { positive: sentiment, negative: !sentiment },
        }
    }

    pub fn is_positive(&self) -> bool {
        self.cats.positive
    }

    pub fn is_negative(&self) -> bool {
        self.cats.negative
    }

    /// Look up a category flag by name (`"POSITIVE"` / `"NEGATIVE"`).
    pub fn get(&self, label: &str) -> Option<bool> {
        match label {
            POSITIVE => Some(self.cats.positive),
            NEGATIVE => Some(self.cats.negative),
            _ => None,
        }
    }

    /// Class index used by evaluation: POSITIVE → 1, NEGATIVE → 0.
    pub fn true_class(&self) -> usize {
        usize::from(self.cats.positive)
    }
}

impl From<&Example> for LabelRecord {
    fn from(example: &Example) -> Self {
        Self::from_sentiment(example.sentiment)
    }
}

// ─── Partition ────────────────────────────────────────────────────────────────
/// Ordered texts with parallel label records.
///
/// Both vectors always have the same length; the only way to build
/// one is from examples or from another partition's slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    texts:  Vec<String>,
    labels: Vec<LabelRecord>,
}

impl Partition {
    pub fn from_examples(examples: Vec<Example>) -> Self {
        let labels = examples.iter().map(LabelRecord::from).collect();
        let texts  = examples.into_iter().map(|e| e.text).collect();
        Self { texts, labels }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn labels(&self) -> &[LabelRecord] {
        &self.labels
    }

    /// Texts in `range`, clamped to the partition length.
    pub fn texts_in(&self, range: Range<usize>) -> &[String] {
        &self.texts[clamp(range, self.len())]
    }

    /// Label records in `range`, clamped to the partition length.
    pub fn labels_in(&self, range: Range<usize>) -> &[LabelRecord] {
        &self.labels[clamp(range, self.len())]
    }

    /// Owned `(text, label)` pairs for the first `n` examples.
    /// This is the shape the training routine shuffles and batches.
    pub fn zipped_prefix(&self, n: usize) -> Vec<(String, LabelRecord)> {
        self.texts
            .iter()
            .cloned()
            .zip(self.labels.iter().copied())
            .take(n)
            .collect()
    }
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end   = range.end.min(len);
    let start = range.start.min(end);
    start..end
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_flags_are_exclusive() {
        for sentiment in [true, false] {
            let label = LabelRecord::from_sentiment(sentiment);
            assert_ne!(label.is_positive(), label.is_negative());
            assert_eq!(label.is_positive(), sentiment);
        }
    }

    #[test]
    fn test_true_class_mapping() {
        assert_eq!(LabelRecord::from_sentiment(true).true_class(), 1);
        assert_eq!(LabelRecord::from_sentiment(false).true_class(), 0);
    }

    #[test]
    fn test_label_json_shape() {
        let json = serde_json::to_string(&LabelRecord::from_sentiment(true)).unwrap();
        assert_eq!(json, r#"{"cats":{"POSITIVE":true,"NEGATIVE":false}}"#);
    }

    #[test]
    fn test_non_exclusive_label_rejected() {
        let both = r#"{"cats":{"POSITIVE":true,"NEGATIVE":true}}"#;
        assert!(serde_json::from_str::<LabelRecord>(both).is_err());

        let neither = r#"{"cats":{"POSITIVE":false,"NEGATIVE":false}}"#;
        assert!(serde_json::from_str::<LabelRecord>(neither).is_err());
    }

    #[test]
    fn test_get_unknown_label() {
        let label = LabelRecord::from_sentiment(false);
        assert_eq!(label.get(NEGATIVE), Some(true));
        assert_eq!(label.get("NEUTRAL"), None);
    }

    #[test]
    fn test_partition_ranges_are_clamped() {
        let p = Partition::from_examples(vec![
            Example::new("a", true),
            Example::new("b", false),
            Example::new("c", true),
        ]);
        assert_eq!(p.texts_in(1..30), &["b".to_string(), "c".to_string()]);
        assert!(p.texts_in(20..30).is_empty());
        assert_eq!(p.labels_in(0..2).len(), 2);
        assert_eq!(p.zipped_prefix(1000).len(), 3);
    }
}
