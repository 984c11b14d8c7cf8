// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From a JSON file of featurised windows to a model-ready
// tensor:
//
//   windows.json
//       │
//       ▼
//   JsonSequenceLoader → parses and validates the windows
//       │
//       ▼
//   SequenceBatcher    → stacks them into [batch, seq_len, features]
//       │
//       ▼
//   RiskLstm::forward
//
// Raw sensor ingestion and feature engineering happen upstream
// and are not part of this crate.

/// Observation window type and shape validation
pub mod sequence;

/// Reads windows from a JSON file
pub mod loader;

/// Stacks windows into a 3-D tensor on a device
pub mod batcher;
