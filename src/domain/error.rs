// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the harness can produce has a typed home here.
//
//   DataLoadError          → the CSV source is unreadable or malformed
//   ModelConstructionError → the classifier backend cannot build the model
//   ClassifierError        → the classifier failed while training/predicting
//   CheckFailure           → a learner submission did not pass its check
//   RegistrationError      → exercises could not be bound to names
//
// Only DataLoadError is fatal to a lesson session (no context can
// be built without data). A CheckFailure is always rendered as a
// message for the learner and the session continues.
//
// The application and CLI layers wrap these in anyhow::Error
// with extra context, the same way the rest of the app does.
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Recoverable Errors with Result)

use std::path::PathBuf;
use thiserror::Error;

// ─── DataLoadError ────────────────────────────────────────────────────────────
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read data source '{path}': {source}")]
    Unreadable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("data source is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("split fraction must be within [0, 1], got {0}")]
    InvalidSplit(f64),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

// ─── ModelConstructionError ───────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelConstructionError {
    #[error("language '{0}' is not available in this backend")]
    UnknownLanguage(String),

    #[error("architecture '{0}' is not supported by this backend")]
    UnsupportedArchitecture(String),

    #[error("pipeline already has a stage named '{0}'")]
    DuplicatePipe(String),

    #[error("label '{0}' is already registered")]
    DuplicateLabel(String),

    #[error("text categorizer is unavailable: {0}")]
    Unavailable(String),
}

// ─── ClassifierError ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("the model has no '{0}' pipeline stage")]
    MissingPipe(String),

    #[error("cannot begin training: the text categorizer has no labels")]
    NoLabels,

    #[error("label record has no value for '{0}'")]
    UnknownLabel(String),

    #[error("got {texts} texts but {labels} labels")]
    LengthMismatch { texts: usize, labels: usize },

    #[error("dropout must be within [0, 1), got {0}")]
    InvalidDropout(f32),

    #[error("cannot tokenize text: {0}")]
    Tokenization(String),
}

// ─── CheckFailure ─────────────────────────────────────────────────────────────
/// Why a coding exercise check did not pass.
///
/// `Assertion` is a result mismatch against the oracle,
/// `Structural` is a violated precondition (wrong labels, wrong
/// architecture, wrong kind of submission).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckFailure {
    #[error("{0}")]
    Assertion(String),

    #[error("{0}")]
    Structural(String),

    #[error("could not build a model for grading: {0}")]
    Model(#[from] ModelConstructionError),

    #[error("the classifier failed while grading: {0}")]
    Classifier(#[from] ClassifierError),
}

// ─── RegistrationError ────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("lesson {tutorial_id} has no exercises to bind")]
    Empty { tutorial_id: u32 },

    #[error("exercise name '{0}' would be bound twice")]
    NameCollision(String),

    #[error("lesson {0} is already registered")]
    DuplicateLesson(u32),
}
