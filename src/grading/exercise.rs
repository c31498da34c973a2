// ============================================================
// Grading Layer — Exercises
// ============================================================
// An exercise is one graded unit of a lesson. There are two
// kinds, modelled as a tagged enum:
//
//   Coding     — hint + solution text + an automated check of
//                the learner's submitted model or function
//   Reflective — a free-form question; the model answer can be
//                revealed, but nothing is checked
//
// Both share the same capabilities: describe, hint, solution,
// and check. A reflective exercise's check always reports
// Attempted.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)
//            Rust Book §17 (Trait objects vs enums)

use std::fmt;

use crate::domain::error::CheckFailure;
use crate::domain::traits::Language;
use crate::grading::checks::{self, EvaluateFn, PredictFn, TrainFn};
use crate::grading::context::GradingContext;

// ─── Submission ───────────────────────────────────────────────────────────────
/// What a learner hands in for an exercise.
pub enum Submission<'a, L: Language> {
    /// A built pipeline (the create-model exercise)
    Model(&'a L),
    Train(&'a TrainFn<'a, L>),
    Predict(&'a PredictFn<'a, L>),
    Evaluate(&'a EvaluateFn<'a, L>),
    /// Free text for a reflective exercise
    Answer(&'a str),
}

impl<L: Language> Submission<'_, L> {
    fn describe(&self) -> &'static str {
        match self {
            Submission::Model(_)    => "a model",
            Submission::Train(_)    => "a train function",
            Submission::Predict(_)  => "a predict function",
            Submission::Evaluate(_) => "an evaluate function",
            Submission::Answer(_)   => "a written answer",
        }
    }
}

// ─── CheckOutcome ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Passed,
    Failed(CheckFailure),
    /// Reflective exercises: recorded, never graded
    Attempted,
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Passed       => f.write_str("Correct"),
            CheckOutcome::Failed(why)  => write!(f, "Incorrect: {why}"),
            CheckOutcome::Attempted    => f.write_str("Attempted (see the solution for a model answer)"),
        }
    }
}

// ─── Exercise kinds ───────────────────────────────────────────────────────────
/// Which check routine a coding exercise runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    CreateModel,
    Train,
    Predict,
    Evaluate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodingExercise {
    pub title:    &'static str,
    /// Name of the variable the learner's artifact is bound to
    pub var:      &'static str,
    pub hint:     &'static str,
    pub solution: &'static str,
    pub kind:     CheckKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectiveExercise {
    pub title:    &'static str,
    pub question: &'static str,
    pub solution: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Exercise {
    Coding(CodingExercise),
    Reflective(ReflectiveExercise),
}

impl Exercise {
    pub fn describe(&self) -> &str {
        match self {
            Exercise::Coding(c)     => c.title,
            Exercise::Reflective(r) => r.title,
        }
    }

    /// Hint text; reflective exercises have none.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Exercise::Coding(c)     => Some(c.hint),
            Exercise::Reflective(_) => None,
        }
    }

    pub fn solution(&self) -> &str {
        match self {
            Exercise::Coding(c)     => c.solution,
            Exercise::Reflective(r) => r.solution,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, Exercise::Coding(_))
    }

    /// Grade a submission. Never panics and never returns an error:
    /// every problem becomes a Failed outcome with a message.
    pub fn check<L: Language>(&self, ctx: &GradingContext, submission: Submission<'_, L>) -> CheckOutcome {
        let coding = match self {
            Exercise::Coding(c)     => c,
            Exercise::Reflective(_) => return CheckOutcome::Attempted,
        };

        let result = match (coding.kind, &submission) {
            (CheckKind::CreateModel, Submission::Model(nlp))    => checks::check_create_model(*nlp),
            (CheckKind::Train,       Submission::Train(f))      => checks::check_train(ctx, *f),
            (CheckKind::Predict,     Submission::Predict(f))    => checks::check_predict(ctx, *f),
            (CheckKind::Evaluate,    Submission::Evaluate(f))   => checks::check_evaluate(ctx, *f),
            (kind, other) => Err(CheckFailure::Structural(format!(
                "`{}` should be {}, but {} was submitted",
                coding.var,
                expected_artifact(kind),
                other.describe()
            ))),
        };

        match result {
            Ok(())   => CheckOutcome::Passed,
            Err(why) => {
                tracing::debug!("Check for '{}' failed: {}", coding.var, why);
                CheckOutcome::Failed(why)
            }
        }
    }
}

fn expected_artifact(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::CreateModel => "a model",
        CheckKind::Train       => "a train function",
        CheckKind::Predict     => "a predict function",
        CheckKind::Evaluate    => "an evaluate function",
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::factory::create_model;
    use crate::ml::reference;
    use crate::testing::{partitions, StubLanguage};

    fn coding(kind: CheckKind) -> Exercise {
        Exercise::Coding(CodingExercise {
            title:    "Build it",
            var:      "nlp",
            hint:     "Use create_model",
            solution: "create_model()",
            kind,
        })
    }

    fn ctx() -> GradingContext {
        let (train, val) = partitions(16, 30);
        GradingContext::new(train, val)
    }

    #[test]
    fn test_reflective_always_attempted() {
        let ex = Exercise::Reflective(ReflectiveExercise {
            title:    "Think",
            question: "How would you improve the model?",
            solution: "Try another architecture.",
        });
        let outcome = ex.check::<StubLanguage>(&ctx(), Submission::Answer("more data"));
        assert_eq!(outcome, CheckOutcome::Attempted);
        assert_eq!(ex.hint(), None);
        assert!(!ex.is_checked());
    }

    #[test]
    fn test_coding_exercise_passes() {
        let nlp: StubLanguage = create_model().unwrap();
        let outcome = coding(CheckKind::CreateModel).check(&ctx(), Submission::Model(&nlp));
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_wrong_submission_kind_is_structural() {
        let predict = reference::predict::<StubLanguage>;
        let outcome = coding(CheckKind::CreateModel).check(&ctx(), Submission::Predict(&predict));
        match outcome {
            CheckOutcome::Failed(CheckFailure::Structural(msg)) => {
                assert_eq!(msg, "`nlp` should be a model, but a predict function was submitted");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_failure_renders_message() {
        let outcome = coding(CheckKind::CreateModel).check(&ctx(), Submission::Model(&StubLanguage::default()));
        assert_eq!(
            outcome.to_string(),
            "Incorrect: Please add a TextCategorizer to the model's pipeline"
        );
    }
}
