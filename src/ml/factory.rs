// ============================================================
// Layer 5 — Model Factory
// ============================================================
// Builds the untrained classifier every exercise starts from:
//
//   blank "en" pipeline
//     └── "textcat" stage
//           exclusive_classes = true
//           architecture      = bow
//           labels            = [NEGATIVE, POSITIVE]   (in that order)
//
// The label order matters: predict returns the argmax column,
// so column 0 must always mean NEGATIVE and column 1 POSITIVE.
//
// Generic over the backend so grading tests can build the same
// pipeline on a stub classifier.
//
// Reference: Rust Book §10 (Generic Types)

use crate::domain::error::ModelConstructionError;
use crate::domain::example::{NEGATIVE, POSITIVE};
use crate::domain::traits::{Architecture, Language, TextCatConfig, TextCategorizer};

/// Language code of the blank pipeline.
pub const LANGUAGE: &str = "en";

/// The text categorizer configuration the lesson asks for.
pub const TEXTCAT_CONFIG: TextCatConfig = TextCatConfig {
    exclusive_classes: true,
    architecture:      Architecture::Bow,
};

/// Labels in the order they must be registered.
pub const LABELS: [&str; 2] = [NEGATIVE, POSITIVE];

/// A fresh, untrained sentiment classifier.
pub fn create_model<L: Language>() -> Result<L, ModelConstructionError> {
    let mut nlp = L::blank(LANGUAGE)?;

    let textcat = nlp.add_textcat(TEXTCAT_CONFIG)?;
    for label in LABELS {
        textcat.add_label(label)?;
    }

    tracing::debug!("Created blank '{}' model with textcat labels {:?}", LANGUAGE, LABELS);
    Ok(nlp)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::TEXTCAT;
    use crate::ml::bow::BowLanguage;

    #[test]
    fn test_labels_in_fixed_order() {
        let nlp: BowLanguage = create_model().unwrap();
        let textcat = nlp.get_pipe(TEXTCAT).unwrap();
        assert_eq!(textcat.labels(), &["NEGATIVE".to_string(), "POSITIVE".to_string()]);
    }

    #[test]
    fn test_bow_exclusive_config() {
        let nlp: BowLanguage = create_model().unwrap();
        let config = nlp.get_pipe(TEXTCAT).unwrap().config();
        assert_eq!(config.architecture, Architecture::Bow);
        assert!(config.exclusive_classes);
    }

    #[test]
    fn test_every_call_identical() {
        let a: BowLanguage = create_model().unwrap();
        let b: BowLanguage = create_model().unwrap();
        assert_eq!(a, b);
    }
}
