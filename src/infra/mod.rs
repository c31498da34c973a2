// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to one layer:
//
//   config.rs     — HarnessConfig: defaults, JSON loading,
//                   validation
//
//   seed.rs       — pinned StdRng construction; the only way
//                   the crate creates randomness
//
//   checkpoint.rs — saves/loads the trained bag-of-words model
//                   and marks the epoch with the best
//                   validation accuracy
//
//   metrics.rs    — appends per-epoch loss and accuracy to a
//                   CSV file
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Harness configuration
pub mod config;

/// Seeded random number generators
pub mod seed;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
