// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the risk model using Burn's CompactRecorder.
//
// What gets saved:
//   1. model.mpk          — all LSTM and head parameters
//   2. model_config.json  — the RiskLstmConfig that built them
//
// The config has to be stored next to the weights: a record can
// only be loaded into a model with the exact same architecture,
// so inference rebuilds the model from the config first and then
// loads the record into it.
//
// CompactRecorder stores half-precision values, so a restored
// model reproduces scores to about three decimal places.
//
//   checkpoints/
//     model.mpk
//     model_config.json

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{RiskLstm, RiskLstmConfig};

const MODEL_FILE:  &str = "model";
/// Extension CompactRecorder (MessagePack, no compression) appends.
const MODEL_EXT:   &str = "mpk";
const CONFIG_FILE: &str = "model_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Does not touch the filesystem; directories are created on save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// True once both the config and the parameter file are on disk.
    pub fn has_checkpoint(&self) -> bool {
        self.dir.join(CONFIG_FILE).exists() && self.model_path().exists()
    }

    /// Full path of the parameter file as written by the recorder.
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE).with_extension(MODEL_EXT)
    }

    /// Save the model architecture to JSON.
    ///
    /// Write it after the parameters: `has_checkpoint` only reports
    /// a checkpoint once both files exist, and a config without
    /// parameters cannot be restored.
    pub fn save_config(&self, cfg: &RiskLstmConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", self.dir.display()))?;

        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    /// Load the model architecture from JSON.
    ///
    /// Called before loading parameters, because a record can only
    /// be loaded into a model built with the same dimensions.
    pub fn load_config(&self) -> Result<RiskLstmConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. Run 'init' or export a trained model first.",
                    path.display()
                )
            })?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid model config", path.display()))
    }

    /// Save all model parameters.
    ///
    /// Steps:
    ///   1. model.into_record() extracts every LSTM and head tensor
    ///   2. CompactRecorder serialises them at half precision
    ///   3. The result is written to {dir}/model.mpk
    pub fn save_model<B: Backend>(&self, model: &RiskLstm<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create checkpoint dir '{}'", self.dir.display()))?;

        // The recorder appends its own extension.
        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model parameters to '{}'", path.display());
        Ok(())
    }

    /// Loads parameters into `model`, which must have been built from the saved config.
    pub fn load_model<B: Backend>(
        &self,
        model:  RiskLstm<B>,
        device: &B::Device,
    ) -> Result<RiskLstm<B>> {
        let path = self.dir.join(MODEL_FILE);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load model parameters from '{}'", path.display()))?;
        Ok(model.load_record(record))
    }

    /// Rebuilds the model from the saved config and loads its parameters.
    pub fn restore<B: Backend>(&self, device: &B::Device) -> Result<(RiskLstmConfig, RiskLstm<B>)> {
        let cfg   = self.load_config()?;
        let model = cfg.try_init::<B>(device)
            .with_context(|| format!("Saved config in '{}' is invalid", self.dir.display()))?;
        let model = self.load_model(model, device)?;
        tracing::info!(
            "Restored model from '{}' ({} params)",
            self.dir.display(),
            model.num_params()
        );
        Ok((cfg, model))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let cfg  = RiskLstmConfig::new(6, 32, 2, 4).with_dropout(0.3);

        ckpt.save_config(&cfg).unwrap();
        let loaded = ckpt.load_config().unwrap();
        assert_eq!(loaded.input_dim, 6);
        assert_eq!(loaded.hidden_dim, 32);
        assert_eq!(loaded.num_layers, 2);
        assert_eq!(loaded.output_dim, 4);
        assert_eq!(loaded.dropout, 0.3);
    }

    #[test]
    fn test_saved_model_counts_as_checkpoint() {
        let device = Default::default();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path());

        let cfg   = RiskLstmConfig::new(3, 8, 1, 2);
        let model = cfg.try_init::<TestBackend>(&device).unwrap();
        ckpt.save_model(&model).unwrap();
        assert!(ckpt.model_path().exists(), "recorder wrote something other than model.mpk");
        assert!(!ckpt.has_checkpoint());

        ckpt.save_config(&cfg).unwrap();
        assert!(ckpt.has_checkpoint());
    }

    #[test]
    fn test_missing_checkpoint() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().join("empty"));
        assert!(!ckpt.has_checkpoint());
        assert!(ckpt.load_config().is_err());
    }

    #[test]
    fn test_restored_model_reproduces_scores() {
        let device = Default::default();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = CheckpointManager::new(dir.path());

        let cfg   = RiskLstmConfig::new(3, 8, 2, 2);
        let model = cfg.try_init::<TestBackend>(&device).unwrap();
        ckpt.save_config(&cfg).unwrap();
        ckpt.save_model(&model).unwrap();
        assert!(ckpt.has_checkpoint());

        let (_, restored) = ckpt.restore::<TestBackend>(&device).unwrap();
        let x = Tensor::<TestBackend, 3>::ones([1, 4, 3], &device);

        let before: Vec<f32> = model.forward(x.clone()).unwrap().into_data().to_vec().unwrap();
        let after:  Vec<f32> = restored.forward(x).unwrap().into_data().to_vec().unwrap();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-2, "{a} vs {b}");
        }
    }
}
