// ============================================================
// Grading Layer
// ============================================================
// Sits between the application layer (which drives a lesson
// session) and the ML layer (which provides the oracle).
//
//   context.rs  — shared partitions + pinned seed, built once
//   exercise.rs — Exercise enum, Submission, CheckOutcome
//   checks.rs   — the four check routines and their diffs
//   registry.rs — q_{n} naming and lesson grouping
//   lesson.rs   — the exercises of lesson 262
//
// Reference: Rust Book §7 (Modules)

pub mod context;

pub mod exercise;

pub mod checks;

pub mod registry;

pub mod lesson;
