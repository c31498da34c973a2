// ============================================================
// Layer 2 — Lesson Session
// ============================================================
// Tracks where a learner is on each exercise of one lesson.
//
// Per-exercise state machine:
//
//   Unattempted ──hint──▶ HintShown
//        │                   │
//        └──────submit───────┴──▶ Passed | Failed(message)
//                                   │
//                                   └──submit again (no limit)
//
// Reflective exercises go to Attempted on submit. Viewing the
// solution never changes the state; it is recorded alongside.
//
// Everything is in memory; a new session starts from scratch.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

use crate::domain::traits::Language;
use crate::grading::context::GradingContext;
use crate::grading::exercise::{CheckOutcome, Exercise, Submission};
use crate::grading::registry::Lesson;

#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseState {
    Unattempted,
    HintShown,
    Passed,
    Failed(String),
    Attempted,
}

impl ExerciseState {
    fn after(outcome: &CheckOutcome) -> Self {
        match outcome {
            CheckOutcome::Passed       => ExerciseState::Passed,
            CheckOutcome::Failed(why)  => ExerciseState::Failed(why.to_string()),
            CheckOutcome::Attempted    => ExerciseState::Attempted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub state:           ExerciseState,
    pub attempts:        usize,
    pub solution_viewed: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self { state: ExerciseState::Unattempted, attempts: 0, solution_viewed: false }
    }
}

pub struct LessonSession<'a> {
    lesson:   &'a Lesson,
    ctx:      &'a GradingContext,
    progress: BTreeMap<String, Progress>,
}

impl<'a> LessonSession<'a> {
    pub fn new(lesson: &'a Lesson, ctx: &'a GradingContext) -> Self {
        let progress = lesson.names().map(|n| (n.to_string(), Progress::default())).collect();
        Self { lesson, ctx, progress }
    }

    /// Reveal the hint for `name`.
    pub fn hint(&mut self, name: &str) -> Result<&'a str> {
        let exercise = self.exercise(name)?;
        let hint = exercise
            .hint()
            .ok_or_else(|| anyhow!("'{name}' is a reflective exercise and has no hint"))?;

        let p = self.progress_mut(name)?;
        if p.state == ExerciseState::Unattempted {
            p.state = ExerciseState::HintShown;
        }
        Ok(hint)
    }

    /// Reveal the solution for `name`.
    pub fn solution(&mut self, name: &str) -> Result<&'a str> {
        let solution = self.exercise(name)?.solution();
        self.progress_mut(name)?.solution_viewed = true;
        tracing::debug!("Solution for '{}' viewed", name);
        Ok(solution)
    }

    /// Grade a submission and move the exercise to its new state.
    pub fn submit<L: Language>(&mut self, name: &str, submission: Submission<'_, L>) -> Result<CheckOutcome> {
        let exercise = self.exercise(name)?;
        let outcome  = exercise.check(self.ctx, submission);

        match &outcome {
            CheckOutcome::Failed(why) => tracing::warn!("'{}' failed: {}", name, why),
            other                     => tracing::info!("'{}': {}", name, other),
        }

        let p = self.progress_mut(name)?;
        p.attempts += 1;
        p.state = ExerciseState::after(&outcome);
        Ok(outcome)
    }

    pub fn progress(&self, name: &str) -> Option<&Progress> {
        self.progress.get(name)
    }

    pub fn state(&self, name: &str) -> Option<&ExerciseState> {
        self.progress(name).map(|p| &p.state)
    }

    /// Every exercise in lesson order with its progress.
    pub fn summary(&self) -> Vec<(&'a str, &Progress)> {
        self.lesson
            .names()
            .filter_map(|n| self.progress.get(n).map(|p| (n, p)))
            .collect()
    }

    pub fn passed_count(&self) -> usize {
        self.progress.values().filter(|p| p.state == ExerciseState::Passed).count()
    }

    fn exercise(&self, name: &str) -> Result<&'a Exercise> {
        self.lesson.get(name).ok_or_else(|| {
            let known: Vec<_> = self.lesson.names().collect();
            anyhow!("No exercise named '{name}' (expected one of {known:?})")
        })
    }

    fn progress_mut(&mut self, name: &str) -> Result<&mut Progress> {
        self.progress
            .get_mut(name)
            .ok_or_else(|| anyhow!("No exercise named '{name}'"))
    }
}
