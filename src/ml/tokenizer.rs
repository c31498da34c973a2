// ============================================================
// Layer 5 — Tokenizer
// ============================================================
// Turns a review into the token sequence the bag-of-words
// text categorizer counts.
//
// Built from the HuggingFace `tokenizers` pipeline pieces, the
// same normaliser and pre-tokenizer pair the QA tokenizer JSON
// configured:
//   1. BertNormalizer — clean_text (control chars dropped, odd
//      whitespace such as \t, \r, NBSP mapped to spaces),
//      lowercase, accents stripped
//   2. Whitespace pre-tokenizer — splits on `\w+|[^\w\s]+`
//        "Loved it!!" → ["loved", "it", "!!"]
//        "don't"      → ["don", "'", "t"]
//
// No vocabulary model is attached: the categorizer keys its
// weights on the token strings themselves, so unseen words are
// simply ignored at scoring time rather than mapped to [UNK].
//
// Tokenising is pure and order-preserving: the same text always
// yields the same tokens in the same order.
//
// Reference: HuggingFace tokenizers documentation (normalizers,
//            pre_tokenizers)

use serde::{Deserialize, Serialize};
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{
    NormalizedString, Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer,
};

use crate::domain::error::ClassifierError;
use crate::domain::traits::Doc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(&self, text: &str) -> Result<Doc, ClassifierError> {
        let normalizer = BertNormalizer::new(true, true, None, true);

        let mut normalized = NormalizedString::from(text);
        normalizer
            .normalize(&mut normalized)
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;

        let mut pre = PreTokenizedString::from(normalized);
        Whitespace::default()
            .pre_tokenize(&mut pre)
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;

        let tokens = pre
            .get_splits(OffsetReferential::Normalized, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece.to_string())
            .collect();

        Ok(Doc { text: text.to_string(), tokens })
    }
}
