// ============================================================
// textcat-grader
// ============================================================
// Exercises, reference solutions and auto-grading for a lesson
// on training a sentiment text classifier.
//
// Layers:
//   cli         — Layer 1: argument parsing, printing
//   application — Layer 2: lesson session + use cases
//   domain      — Layer 3: examples, label records, traits, errors
//   data        — Layer 4: CSV loading, splitting, batching
//   ml          — Layer 5: bag-of-words backend, reference ops
//   infra       — Layer 6: config, seeds, checkpoints, metrics
//   grading     — checks, grading context, exercise registry

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
pub mod grading;

#[cfg(test)]
mod testing;
