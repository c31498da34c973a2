// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal (running a lesson, verifying it, training, classifying).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Per-exercise progress for one learner
pub mod session;

// Reference solutions graded by their own checks
pub mod verify_use_case;

// The training workflow
pub mod train_use_case;

// Labelling text with a trained checkpoint
pub mod classify_use_case;
