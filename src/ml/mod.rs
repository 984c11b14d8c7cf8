// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives in this layer.
//
//   model.rs      — the stacked LSTM + risk head
//   error.rs      — configuration and shape errors
//   inferencer.rs — restores a checkpoint and scores windows
//
// Training is not part of this crate: an external trainer
// produces the parameters and hands them over through the
// checkpoint format in infra::checkpoint.

/// Stacked LSTM sequence risk model
pub mod model;

/// Typed model errors
pub mod error;

/// Inference-mode scoring of observation windows
pub mod inferencer;
