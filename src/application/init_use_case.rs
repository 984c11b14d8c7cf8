// ============================================================
// Layer 2 — InitUseCase
// ============================================================
// Builds a freshly initialised risk model and writes it out as a
// checkpoint:
//
//   Step 1: Validate the architecture    (Layer 5 - ml)
//   Step 2: Seed the backend RNG         (Layer 5 - ml)
//   Step 3: Initialise parameters        (Layer 5 - ml)
//   Step 4: Save parameters, then config (Layer 6 - infra)
//
// The result is the exact format an external trainer exports,
// so the predict workflow can be exercised end to end before
// any trained weights exist.

use anyhow::{Context, Result};
use burn::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::RiskLstmConfig;

type InitBackend = burn::backend::NdArray;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    pub checkpoint_dir: String,
    pub input_dim:      usize,
    pub hidden_dim:     usize,
    pub num_layers:     usize,
    pub output_dim:     usize,
    pub dropout:        f64,
    /// Random when absent; the chosen seed is logged.
    pub seed:           Option<u64>,
    pub overwrite:      bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            checkpoint_dir: "checkpoints".to_string(),
            input_dim:      8,
            hidden_dim:     64,
            num_layers:     2,
            output_dim:     4,
            dropout:        0.2,
            seed:           None,
            overwrite:      false,
        }
    }
}

impl InitConfig {
    pub fn model_config(&self) -> RiskLstmConfig {
        RiskLstmConfig::new(self.input_dim, self.hidden_dim, self.num_layers, self.output_dim)
            .with_dropout(self.dropout)
    }
}

pub struct InitUseCase {
    config: InitConfig,
}

impl InitUseCase {
    pub fn new(config: InitConfig) -> Self {
        Self { config }
    }

    /// Returns the seed that was used.
    pub fn execute(&self) -> Result<u64> {
        let cfg  = &self.config;
        let ckpt = CheckpointManager::new(&cfg.checkpoint_dir);

        if ckpt.has_checkpoint() && !cfg.overwrite {
            anyhow::bail!(
                "A checkpoint already exists in '{}' (pass --overwrite to replace it)",
                cfg.checkpoint_dir
            );
        }

        let model_cfg = cfg.model_config();
        model_cfg.validate().context("Invalid model architecture")?;

        let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
        InitBackend::seed(seed);
        tracing::info!("Initialising model with seed {}", seed);

        let device = Default::default();
        let model  = model_cfg.try_init::<InitBackend>(&device)?;
        tracing::info!(
            "Model ready: {} LSTM layers, hidden_dim={}, head_dim={}, {} params",
            model.num_layers(), model.hidden_dim(), model.head_dim(), model.num_params()
        );

        ckpt.save_model(&model)?;
        ckpt.save_config(&model_cfg)?;
        tracing::info!("Checkpoint written to '{}'", cfg.checkpoint_dir);
        Ok(seed)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path) -> InitConfig {
        InitConfig {
            checkpoint_dir: dir.to_string_lossy().into_owned(),
            input_dim:      4,
            hidden_dim:     8,
            num_layers:     1,
            output_dim:     2,
            seed:           Some(7),
            ..InitConfig::default()
        }
    }

    #[test]
    fn test_writes_checkpoint() {
        let dir  = tempfile::tempdir().unwrap();
        let seed = InitUseCase::new(config(dir.path())).execute().unwrap();
        assert_eq!(seed, 7);
        assert!(CheckpointManager::new(dir.path()).has_checkpoint());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        InitUseCase::new(config(dir.path())).execute().unwrap();
        assert!(InitUseCase::new(config(dir.path())).execute().is_err());

        let again = InitConfig { overwrite: true, ..config(dir.path()) };
        assert!(InitUseCase::new(again).execute().is_ok());
    }

    #[test]
    fn test_failed_model_save_leaves_no_config() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the parameter file should go makes the recorder fail.
        std::fs::create_dir_all(CheckpointManager::new(dir.path()).model_path()).unwrap();

        assert!(InitUseCase::new(config(dir.path())).execute().is_err());
        assert!(!dir.path().join("model_config.json").exists());
    }

    #[test]
    fn test_invalid_architecture_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bad = InitConfig { hidden_dim: 0, ..config(dir.path()) };
        assert!(InitUseCase::new(bad).execute().is_err());
        assert!(!CheckpointManager::new(dir.path()).has_checkpoint());
    }
}
