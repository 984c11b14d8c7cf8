// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Scores observation windows and turns the raw risk vectors
// into thresholded assessments:
//
//   Step 1: Restore the model from a checkpoint   (Layer 6 - infra)
//   Step 2: Load windows from a source            (Layer 4 - data)
//   Step 3: Run the inference-mode forward pass   (Layer 5 - ml)
//   Step 4: Apply alert thresholds                (Layer 3 - domain)

use anyhow::Result;

use crate::data::sequence::SequenceWindow;
use crate::domain::{
    assessment::RiskAssessment,
    hazard::AlertThresholds,
    traits::{RiskForecaster, SequenceSource},
};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
    thresholds: AlertThresholds,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: impl Into<String>, thresholds: AlertThresholds) -> Result<Self> {
        let dir: String = checkpoint_dir.into();
        let ckpt        = CheckpointManager::new(dir);
        let inferencer  = Inferencer::from_checkpoint(&ckpt)?;
        Ok(Self::with_inferencer(inferencer, thresholds))
    }

    pub fn with_inferencer(inferencer: Inferencer, thresholds: AlertThresholds) -> Self {
        Self { inferencer, thresholds }
    }

    pub fn run(&self, source: &dyn SequenceSource) -> Result<Vec<RiskAssessment>> {
        let windows = source.load_all()?;
        self.forecast(&windows)
    }
}

impl RiskForecaster for PredictUseCase {
    fn forecast(&self, windows: &[SequenceWindow]) -> Result<Vec<RiskAssessment>> {
        let scores = self.inferencer.predict(windows)?;

        let assessments: Vec<RiskAssessment> = windows
            .iter()
            .zip(&scores)
            .enumerate()
            .map(|(i, (w, s))| {
                let region = w.region.clone().unwrap_or_else(|| format!("window_{i}"));
                RiskAssessment::from_scores(region, s, &self.thresholds)
            })
            .collect();

        let alerts: usize = assessments.iter().map(|a| a.alerts().count()).sum();
        tracing::info!("Assessed {} windows, {} hazard alerts", assessments.len(), alerts);
        Ok(assessments)
    }
}
