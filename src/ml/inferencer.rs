// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs a restored risk model over observation windows.
//
// The inference backend is a plain (non-autodiff) backend, so
// inter-layer dropout is inactive and repeated calls on the
// same windows give identical scores.

use anyhow::{Context, Result};
use burn::backend::ndarray::NdArrayDevice;

use crate::data::{batcher::SequenceBatcher, sequence::SequenceWindow};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::RiskLstm;

type InferBackend = burn::backend::NdArray;

pub struct Inferencer {
    model:   RiskLstm<InferBackend>,
    batcher: SequenceBatcher<InferBackend>,
}

impl Inferencer {
    /// Rebuild the model from a checkpoint directory on the CPU backend.
    pub fn from_checkpoint(ckpt: &CheckpointManager) -> Result<Self> {
        let device = NdArrayDevice::default();
        let (_, model) = ckpt.restore::<InferBackend>(&device)?;
        Ok(Self::from_model(model, device))
    }

    /// Wrap an already built model, e.g. one handed over by a trainer.
    pub fn from_model(model: RiskLstm<InferBackend>, device: NdArrayDevice) -> Self {
        Self { model, batcher: SequenceBatcher::new(device) }
    }

    /// One score vector of length `output_dim` per window, in input order.
    pub fn predict(&self, windows: &[SequenceWindow]) -> Result<Vec<Vec<f32>>> {
        let input = self.batcher
            .batch(windows, self.model.input_dim())
            .context("Cannot build an input batch")?;

        let output = self.model.forward(input)?;
        let [batch, output_dim] = output.dims();

        let flat = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;

        tracing::debug!("Scored {} windows x {} hazards", batch, output_dim);
        Ok(flat.chunks(output_dim).map(<[f32]>::to_vec).collect())
    }
}
