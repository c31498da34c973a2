// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define the core
// concepts of the grader:
//
//   example.rs — labelled reviews, label records, partitions
//   traits.rs  — the classifier capability the grader talks to
//   error.rs   — the typed error taxonomy
//
// Rules for this layer:
//   - NO file I/O
//   - NO concrete classifier code (that's Layer 5)
//   - Only plain Rust types and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod error;

pub mod example;

pub mod traits;
