// ============================================================
// Grading Layer — Exercise Registry
// ============================================================
// Binds a lesson's ordered exercises to stable names and makes
// them available to the lesson runtime.
//
//   bind_exercises(262, "q_{n}", [a, b, c])
//       → Lesson 262 { q_1: a, q_2: b, q_3: c }
//
// n is the 1-based position in the list. A CourseRegistry then
// holds every bound lesson, keyed by its tutorial id.
//
// Binding fails when:
//   - the exercise list is empty
//   - two exercises would get the same name (a format string
//     without {n} is the usual culprit)
//   - the lesson id is already registered
//
// Reference: Rust Book §8 (Collections)
//            Rust Book §9 (Error Handling)

use std::collections::{BTreeMap, HashSet};

use crate::domain::error::RegistrationError;
use crate::grading::exercise::Exercise;

/// Placeholder replaced by the 1-based exercise number.
const POSITION_PLACEHOLDER: &str = "{n}";

// ─── Lesson ───────────────────────────────────────────────────────────────────
/// A lesson's exercises, each bound to its name, in order.
#[derive(Debug, Clone)]
pub struct Lesson {
    tutorial_id: u32,
    bindings:    Vec<(String, Exercise)>,
}

impl Lesson {
    pub fn tutorial_id(&self) -> u32 {
        self.tutorial_id
    }

    pub fn get(&self, name: &str) -> Option<&Exercise> {
        self.bindings.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Bound names, in exercise order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Exercise)> {
        self.bindings.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Name every exercise with `var_format` and bind them as one lesson.
pub fn bind_exercises(
    tutorial_id: u32,
    var_format:  &str,
    exercises:   Vec<Exercise>,
) -> Result<Lesson, RegistrationError> {
    if exercises.is_empty() {
        return Err(RegistrationError::Empty { tutorial_id });
    }

    let mut seen     = HashSet::new();
    let mut bindings = Vec::with_capacity(exercises.len());

    for (i, exercise) in exercises.into_iter().enumerate() {
        let name = var_format.replace(POSITION_PLACEHOLDER, &(i + 1).to_string());
        if !seen.insert(name.clone()) {
            return Err(RegistrationError::NameCollision(name));
        }
        bindings.push((name, exercise));
    }

    tracing::debug!("Bound {} exercises for lesson {}", bindings.len(), tutorial_id);
    Ok(Lesson { tutorial_id, bindings })
}

// ─── CourseRegistry ───────────────────────────────────────────────────────────
/// Every bound lesson, retrievable by tutorial id.
#[derive(Debug, Default)]
pub struct CourseRegistry {
    lessons: BTreeMap<u32, Lesson>,
}

impl CourseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, lesson: Lesson) -> Result<(), RegistrationError> {
        let id = lesson.tutorial_id;
        if self.lessons.contains_key(&id) {
            return Err(RegistrationError::DuplicateLesson(id));
        }
        self.lessons.insert(id, lesson);
        Ok(())
    }

    pub fn lesson(&self, tutorial_id: u32) -> Option<&Lesson> {
        self.lessons.get(&tutorial_id)
    }

    pub fn exercise(&self, tutorial_id: u32, name: &str) -> Option<&Exercise> {
        self.lesson(tutorial_id)?.get(name)
    }
}
