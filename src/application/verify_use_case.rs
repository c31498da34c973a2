// ============================================================
// Layer 2 — Verify Use Case
// ============================================================
// Self-test of the harness: every reference solution is handed
// in to its own exercise through a normal lesson session.
//
//   Step 1: Bind the lesson            (grading)
//   Step 2: Build the model + the three reference functions (ml)
//   Step 3: Submit each one under its q_{n} name (application)
//
// A run where anything but "Correct"/"Attempted" comes back
// means the backend is not deterministic under the pinned seed,
// or a check disagrees with its own solution.

use anyhow::{Context, Result};

use crate::application::session::LessonSession;
use crate::grading::checks::{EvaluateFn, PredictFn, TrainFn};
use crate::grading::context::GradingContext;
use crate::grading::exercise::{CheckKind, CheckOutcome, Exercise, Submission};
use crate::grading::registry::Lesson;
use crate::ml::bow::BowLanguage;
use crate::ml::factory::create_model;
use crate::ml::reference;

/// One line of the verify report.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyLine {
    pub name:    String,
    pub title:   String,
    pub outcome: CheckOutcome,
}

pub struct VerifyUseCase<'a> {
    lesson: &'a Lesson,
    ctx:    &'a GradingContext,
}

impl<'a> VerifyUseCase<'a> {
    pub fn new(lesson: &'a Lesson, ctx: &'a GradingContext) -> Self {
        Self { lesson, ctx }
    }

    pub fn execute(&self) -> Result<Vec<VerifyLine>> {
        let mut session = LessonSession::new(self.lesson, self.ctx);

        let nlp: BowLanguage = create_model().context("Cannot build the reference model")?;
        let train: &TrainFn<'_, BowLanguage>       = &reference::train::<BowLanguage>;
        let predict: &PredictFn<'_, BowLanguage>   = &reference::predict::<BowLanguage>;
        let evaluate: &EvaluateFn<'_, BowLanguage> = &reference::evaluate::<BowLanguage>;

        let mut report = Vec::with_capacity(self.lesson.len());
        for (name, exercise) in self.lesson.iter() {
            let submission = match exercise {
                Exercise::Coding(c) => match c.kind {
                    CheckKind::CreateModel => Submission::Model(&nlp),
                    CheckKind::Train       => Submission::Train(train),
                    CheckKind::Predict     => Submission::Predict(predict),
                    CheckKind::Evaluate    => Submission::Evaluate(evaluate),
                },
                Exercise::Reflective(r) => Submission::Answer(r.solution),
            };

            tracing::info!("Verifying '{}' ({})", name, exercise.describe());
            let outcome = session.submit(name, submission)?;
            report.push(VerifyLine {
                name:  name.to_string(),
                title: exercise.describe().to_string(),
                outcome,
            });
        }

        let failed = report.iter().filter(|l| matches!(l.outcome, CheckOutcome::Failed(_))).count();
        tracing::info!("Verified {} exercises, {} failed", report.len(), failed);
        Ok(report)
    }
}
