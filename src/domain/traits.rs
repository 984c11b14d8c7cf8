// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to data sources and forecasters
// through these traits only:
//
//   SequenceSource — JsonSequenceLoader reads windows from a
//                    JSON file; a live feed would implement the
//                    same trait.
//
//   RiskForecaster — PredictUseCase runs the LSTM and applies
//                    alert thresholds.

use anyhow::Result;

use crate::data::sequence::SequenceWindow;
use crate::domain::assessment::RiskAssessment;

/// Anything that can hand over featurised observation windows.
pub trait SequenceSource {
    fn load_all(&self) -> Result<Vec<SequenceWindow>>;
}

/// Anything that can turn observation windows into risk assessments.
pub trait RiskForecaster {
    /// One assessment per window, in input order.
    fn forecast(&self, windows: &[SequenceWindow]) -> Result<Vec<RiskAssessment>>;
}
