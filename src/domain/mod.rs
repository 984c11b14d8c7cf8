// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing hazards and risk assessments.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain structs, enums, and traits

// Hazard kinds, alert severities, alert thresholds
pub mod hazard;

// Thresholded per-region risk assessments
pub mod assessment;

// Abstractions the application layer programs against
pub mod traits;
