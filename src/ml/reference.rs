// ============================================================
// Layer 5 — Reference Operations (train / predict / evaluate)
// ============================================================
// The canonical solutions to the coding exercises. They play
// two roles:
//   1. the solution text learners can reveal
//   2. the oracle every check compares a submission against
//
// Each one is deterministic: given the same seeded RNG and the
// same classifier state, two calls produce bit-identical output.
// That is what lets the checks use exact equality.
//
// Classifier errors pass straight through; nothing is retried.
//
// Reference: Rust Book §13 (Iterators)
//            rand crate documentation (SliceRandom)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::batcher::minibatch;
use crate::domain::error::ClassifierError;
use crate::domain::example::LabelRecord;
use crate::domain::traits::{Language, Losses, TextCategorizer, TEXTCAT};

/// Batch size the lesson trains with.
pub const BATCH_SIZE: usize = 8;

/// Dropout rate for every update.
pub const DROPOUT: f32 = 0.2;

// ─── train ────────────────────────────────────────────────────────────────────
/// Shuffle `train_data`, then one update per batch of `batch_size`
/// with dropout 0.2. Returns the accumulated losses.
pub fn train<L: Language>(
    model:      &mut L,
    train_data: &mut [(String, LabelRecord)],
    optimizer:  &mut L::Optimizer,
    batch_size: usize,
    rng:        &mut StdRng,
) -> Result<Losses, ClassifierError> {
    train_with_dropout(model, train_data, optimizer, batch_size, DROPOUT, rng)
}

/// `train` with an explicit dropout rate.
pub fn train_with_dropout<L: Language>(
    model:      &mut L,
    train_data: &mut [(String, LabelRecord)],
    optimizer:  &mut L::Optimizer,
    batch_size: usize,
    dropout:    f32,
    rng:        &mut StdRng,
) -> Result<Losses, ClassifierError> {
    let mut losses = Losses::new();
    train_data.shuffle(rng);

    for batch in minibatch(train_data, batch_size) {
        model.update(&batch.texts, &batch.labels, optimizer, dropout, &mut losses)?;
    }

    tracing::debug!("Trained on {} examples: {:?}", train_data.len(), losses);
    Ok(losses)
}

// ─── predict ──────────────────────────────────────────────────────────────────
/// Class index with the highest score for each text, in input order.
pub fn predict<L: Language>(model: &L, texts: &[String]) -> Result<Vec<usize>, ClassifierError> {
    // Use the tokenizer to tokenize each input text example
    let docs = texts.iter().map(|t| model.tokenize(t)).collect::<Result<Vec<_>, _>>()?;

    // Use textcat to get the scores for each doc
    let textcat = model
        .get_pipe(TEXTCAT)
        .ok_or_else(|| ClassifierError::MissingPipe(TEXTCAT.to_string()))?;
    let scores = textcat.predict(&docs)?;

    // From the scores, find the class with the highest score
    Ok(scores.argmax_rows())
}

// ─── evaluate ─────────────────────────────────────────────────────────────────
/// Fraction of `texts` whose predicted class matches its label.
///
/// An empty input has accuracy 0.0.
pub fn evaluate<L: Language>(
    model:  &L,
    texts:  &[String],
    labels: &[LabelRecord],
) -> Result<f64, ClassifierError> {
    if texts.len() != labels.len() {
        return Err(ClassifierError::LengthMismatch { texts: texts.len(), labels: labels.len() });
    }

    // Get predictions from textcat model
    let predicted_class = predict(model, texts)?;

    // From labels, get the true class (POSITIVE -> 1, NEGATIVE -> 0)
    let true_class = labels.iter().map(LabelRecord::true_class);

    // Number of correct predictions divided by all predictions
    let correct = predicted_class.iter().zip(true_class).filter(|(p, t)| **p == *t).count();
    Ok(accuracy(correct, texts.len()))
}

fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
