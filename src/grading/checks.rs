// ============================================================
// Grading Layer — Check Routines
// ============================================================
// One routine per coding exercise. Each one:
//
//   1. pins the grading seed and builds a fresh model
//   2. runs the learner's artifact
//   3. pins the same seed again, builds another fresh model
//      (or reuses the trained one for read-only checks)
//   4. runs the reference operation
//   5. diffs the two results exactly
//
//   exercise        learner artifact         compared on
//   ──────────────  ───────────────────────  ──────────────────────
//   create model    the built pipeline       stage, labels, config
//   train           train function           loss map
//   predict         predict function         val texts [20, 30)
//   evaluate        evaluate function        val texts [0, 30)
//
// Every check builds its own model and optimizer, so a failed
// attempt can never leak state into the next one.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            Rust Book §13 (Closures)

use std::ops::Range;

use rand::rngs::StdRng;

use crate::domain::error::{CheckFailure, ClassifierError};
use crate::domain::example::LabelRecord;
use crate::domain::traits::{Architecture, Language, Losses, TextCategorizer, TEXTCAT};
use crate::grading::context::GradingContext;
use crate::ml::factory::{create_model, LABELS};
use crate::ml::reference::{self, BATCH_SIZE};

/// Validation rows the predict check scores.
pub const PREDICT_ROWS: Range<usize> = 20..30;

/// Validation rows the evaluate check scores.
pub const EVALUATE_ROWS: Range<usize> = 0..30;

const LOSS_MISMATCH: &str = "Your loss isn't the same as our solution. \
     Make sure to set batch size to 8 and dropout to 0.2.";

// ─── Submission signatures ────────────────────────────────────────────────────
/// `train(model, train_data, optimizer, batch_size, rng) -> losses`
pub type TrainFn<'a, L> = dyn Fn(
        &mut L,
        &mut [(String, LabelRecord)],
        &mut <L as Language>::Optimizer,
        usize,
        &mut StdRng,
    ) -> Result<Losses, ClassifierError>
    + 'a;

/// `predict(model, texts) -> class indices`
pub type PredictFn<'a, L> = dyn Fn(&L, &[String]) -> Result<Vec<usize>, ClassifierError> + 'a;

/// `evaluate(model, texts, labels) -> accuracy`
pub type EvaluateFn<'a, L> =
    dyn Fn(&L, &[String], &[LabelRecord]) -> Result<f64, ClassifierError> + 'a;

// ─── Create model ─────────────────────────────────────────────────────────────
/// Structural checks on a learner-built pipeline, in order.
pub fn check_create_model<L: Language>(nlp: &L) -> Result<(), CheckFailure> {
    let textcat = match nlp.get_pipe(TEXTCAT) {
        Some(t) if nlp.has_pipe(TEXTCAT) => t,
        _ => {
            return Err(CheckFailure::Structural(
                "Please add a TextCategorizer to the model's pipeline".to_string(),
            ))
        }
    };

    let labels = textcat.labels();
    if labels.iter().map(String::as_str).ne(LABELS) {
        return Err(CheckFailure::Structural(format!(
            "TextCategorizer labels should be {:?}, we found {:?}",
            LABELS, labels
        )));
    }

    let config = textcat.config();
    if config.architecture != Architecture::Bow {
        return Err(CheckFailure::Structural(format!(
            "Please use the 'bow' architecture (found '{}')",
            config.architecture
        )));
    }
    if !config.exclusive_classes {
        return Err(CheckFailure::Structural(
            "Be sure to set exclusive_classes to true in the model config".to_string(),
        ));
    }

    Ok(())
}

// ─── Train ────────────────────────────────────────────────────────────────────
pub fn check_train<L: Language>(ctx: &GradingContext, train: &TrainFn<'_, L>) -> Result<(), CheckFailure> {
    let pairs = ctx.training_pairs();

    let student = {
        let (mut nlp, mut optimizer, mut rng) = fresh_run::<L>(ctx)?;
        let mut data = pairs.clone();
        train(&mut nlp, data.as_mut_slice(), &mut optimizer, BATCH_SIZE, &mut rng)
            .map_err(submission_error)?
    };

    let oracle = {
        let (mut nlp, mut optimizer, mut rng) = fresh_run::<L>(ctx)?;
        let mut data = pairs;
        reference::train(&mut nlp, &mut data, &mut optimizer, BATCH_SIZE, &mut rng)?
    };

    match describe_loss_mismatch(&oracle, &student) {
        None => Ok(()),
        Some(diff) => Err(CheckFailure::Assertion(format!("{LOSS_MISMATCH} {diff}"))),
    }
}

// ─── Predict ──────────────────────────────────────────────────────────────────
pub fn check_predict<L: Language>(
    ctx:     &GradingContext,
    predict: &PredictFn<'_, L>,
) -> Result<(), CheckFailure> {
    let nlp   = trained_model::<L>(ctx)?;
    let texts = ctx.val().texts_in(PREDICT_ROWS);

    let student = predict(&nlp, texts).map_err(submission_error)?;
    let oracle  = reference::predict(&nlp, texts)?;

    match describe_prediction_mismatch(&oracle, &student) {
        None => Ok(()),
        Some(diff) => Err(CheckFailure::Assertion(diff)),
    }
}

// ─── Evaluate ─────────────────────────────────────────────────────────────────
pub fn check_evaluate<L: Language>(
    ctx:      &GradingContext,
    evaluate: &EvaluateFn<'_, L>,
) -> Result<(), CheckFailure> {
    let nlp    = trained_model::<L>(ctx)?;
    let texts  = ctx.val().texts_in(EVALUATE_ROWS);
    let labels = ctx.val().labels_in(EVALUATE_ROWS);

    let student = evaluate(&nlp, texts, labels).map_err(submission_error)?;
    let oracle  = reference::evaluate(&nlp, texts, labels)?;

    // Exact comparison: both runs share one deterministic model
    if student == oracle {
        Ok(())
    } else {
        Err(CheckFailure::Assertion(format!(
            "Your accuracy isn't the same as our solution: expected {oracle}, got {student}."
        )))
    }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────
/// Pinned RNG, fresh model and optimizer for one grading run.
fn fresh_run<L: Language>(ctx: &GradingContext) -> Result<(L, L::Optimizer, StdRng), CheckFailure> {
    let mut rng       = ctx.pinned_rng();
    let mut nlp: L    = create_model()?;
    let optimizer     = nlp.begin_training(&mut rng)?;
    Ok((nlp, optimizer, rng))
}

/// A fresh model trained with the reference routine on the check subset.
fn trained_model<L: Language>(ctx: &GradingContext) -> Result<L, CheckFailure> {
    let (mut nlp, mut optimizer, mut rng) = fresh_run::<L>(ctx)?;
    let mut data = ctx.training_pairs();
    reference::train(&mut nlp, &mut data, &mut optimizer, BATCH_SIZE, &mut rng)?;
    Ok(nlp)
}

/// An error raised by the learner's own function.
fn submission_error(e: ClassifierError) -> CheckFailure {
    CheckFailure::Assertion(format!("Your function returned an error: {e}"))
}

/// Describe every key whose loss differs, or None if the maps match exactly.
pub fn describe_loss_mismatch(expected: &Losses, actual: &Losses) -> Option<String> {
    let mut problems = Vec::new();

    for (key, want) in expected {
        match actual.get(key) {
            None => problems.push(format!("missing loss for '{key}' (expected {want})")),
            Some(got) if got != want => {
                problems.push(format!("loss for '{key}' is {got}, expected {want}"))
            }
            Some(_) => {}
        }
    }
    for (key, got) in actual {
        if !expected.contains_key(key) {
            problems.push(format!("unexpected loss key '{key}' ({got})"));
        }
    }

    if problems.is_empty() {
        None
    } else {
        Some(problems.join("; "))
    }
}

/// Describe how two predicted class sequences differ, or None if equal.
pub fn describe_prediction_mismatch(expected: &[usize], actual: &[usize]) -> Option<String> {
    if expected.len() != actual.len() {
        return Some(format!(
            "Expected {} predictions (one per text), got {}.",
            expected.len(),
            actual.len()
        ));
    }

    let wrong: Vec<usize> = expected
        .iter()
        .zip(actual)
        .enumerate()
        .filter(|(_, (e, a))| e != a)
        .map(|(i, _)| i)
        .collect();

    let &first = wrong.first()?;
    Some(format!(
        "Your predictions differ from our solution at {} of {} positions; \
         first at index {}: expected class {}, got {}.",
        wrong.len(),
        expected.len(),
        first,
        expected[first],
        actual[first],
    ))
}
