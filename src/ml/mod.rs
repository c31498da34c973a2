// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that touches a classifier lives here. Other layers
// only see the Language / TextCategorizer traits from Layer 3.
//
//   tokenizer.rs  — text → tokens for the bag-of-words backend
//   bow.rs        — the shipped Language implementation
//   factory.rs    — builds the lesson's untrained model
//   reference.rs  — canonical train / predict / evaluate (the oracle)
//   trainer.rs    — multi-epoch training with metrics + checkpoints
//   inferencer.rs — loads the best checkpoint and classifies text
//
// Reference: Rust Book §7 (Modules), §10 (Traits)

/// Whitespace/punctuation tokenizer
pub mod tokenizer;

/// Bag-of-words text categorizer backend
pub mod bow;

/// Builds the untrained lesson model
pub mod factory;

/// Reference train / predict / evaluate
pub mod reference;

/// Epoch loop used by the `train` command
pub mod trainer;

/// Classification with a saved model
pub mod inferencer;
