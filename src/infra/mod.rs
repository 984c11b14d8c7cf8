// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that do not belong to a business layer:
//
//   checkpoint.rs — saves and loads the model config (JSON)
//                   and parameters (Burn CompactRecorder), so
//                   whatever trains the model outside this
//                   crate can hand it over for inference.

/// Model config + parameter persistence
pub mod checkpoint;
