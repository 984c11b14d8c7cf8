// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no model math, no printing.

// Initialise a model and write it as a checkpoint
pub mod init_use_case;

// Score observation windows and apply alert thresholds
pub mod predict_use_case;
