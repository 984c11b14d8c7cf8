// ============================================================
// Layer 5 — Model Errors
// ============================================================
// The two ways a call into the risk model can fail:
//
//   InvalidConfiguration — a dimension or dropout rate that
//                          cannot produce a usable model.
//                          Raised by RiskLstmConfig::try_init.
//
//   ShapeMismatch        — a forward input whose batch, time
//                          or feature axis does not fit the
//                          model. Always a caller bug.
//
// NaN / Inf values are not errors: they flow through the
// forward pass with ordinary floating-point semantics.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskModelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Shape mismatch: expected {expected}, got {actual:?}")]
    ShapeMismatch {
        expected: String,
        actual:   Vec<usize>,
    },
}

impl RiskModelError {
    pub fn invalid(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidConfiguration(format!("{field} {reason}"))
    }
}

pub type RiskModelResult<T> = Result<T, RiskModelError>;
