// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands: `init`, `predict` and `inspect`.

use clap::{Args, Subcommand};

use crate::application::init_use_case::InitConfig;
use crate::domain::hazard::AlertThresholds;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialise a model and write it to a checkpoint directory
    Init(InitArgs),

    /// Score observation windows from a JSON file
    Predict(PredictArgs),

    /// Show the architecture stored in a checkpoint
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the model config and parameters to
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Features per time step
    #[arg(long, default_value_t = 8)]
    pub input_dim: usize,

    /// Width of the LSTM hidden/cell state
    #[arg(long, default_value_t = 64)]
    pub hidden_dim: usize,

    /// Number of stacked LSTM layers
    #[arg(long, default_value_t = 2)]
    pub num_layers: usize,

    /// Number of hazard scores (4 = cyclone, flood, seismic, landslide)
    #[arg(long, default_value_t = 4)]
    pub output_dim: usize,

    /// Dropout between stacked LSTM layers, active only while training
    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,

    /// Parameter initialisation seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace an existing checkpoint
    #[arg(long)]
    pub overwrite: bool,
}

impl From<InitArgs> for InitConfig {
    fn from(a: InitArgs) -> Self {
        InitConfig {
            checkpoint_dir: a.checkpoint_dir,
            input_dim:      a.input_dim,
            hidden_dim:     a.hidden_dim,
            num_layers:     a.num_layers,
            output_dim:     a.output_dim,
            dropout:        a.dropout,
            seed:           a.seed,
            overwrite:      a.overwrite,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON file with {"windows": [{"region": ..., "steps": [[...], ...]}, ...]}
    #[arg(long)]
    pub input: String,

    /// Directory holding model_config.json and the model parameters
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Alert threshold for every hazard, in percent
    #[arg(long, default_value_t = 75.0, value_parser = parse_percent)]
    pub threshold: f32,

    /// Cyclone alert threshold, in percent (overrides --threshold)
    #[arg(long, value_parser = parse_percent)]
    pub cyclone: Option<f32>,

    /// Flood alert threshold, in percent (overrides --threshold)
    #[arg(long, value_parser = parse_percent)]
    pub flood: Option<f32>,

    /// Seismic alert threshold, in percent (overrides --threshold)
    #[arg(long, value_parser = parse_percent)]
    pub seismic: Option<f32>,

    /// Landslide alert threshold, in percent (overrides --threshold)
    #[arg(long, value_parser = parse_percent)]
    pub landslide: Option<f32>,

    /// Print assessments as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn thresholds(&self) -> AlertThresholds {
        let base = self.threshold;
        AlertThresholds {
            cyclone:   self.cyclone.unwrap_or(base),
            flood:     self.flood.unwrap_or(base),
            seismic:   self.seismic.unwrap_or(base),
            landslide: self.landslide.unwrap_or(base),
            fallback:  base,
        }
    }
}

/// Alert thresholds are confidence percentages, so only 0..=100 is accepted.
fn parse_percent(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if (0.0..=100.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside 0..=100"))
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["hazard-risk-lstm", "init"]).unwrap();
        let Commands::Init(args) = cli.command else { panic!("expected init") };
        let cfg: InitConfig = args.into();
        assert_eq!(cfg.num_layers, 2);
        assert_eq!(cfg.output_dim, 4);
        assert_eq!(cfg.dropout, 0.2);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_per_hazard_threshold_overrides() {
        let cli = Cli::try_parse_from([
            "hazard-risk-lstm", "predict", "--input", "w.json", "--threshold", "60", "--flood", "40",
        ]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        let t = args.thresholds();
        assert_eq!(t.flood, 40.0);
        assert_eq!(t.cyclone, 60.0);
        assert_eq!(t.fallback, 60.0);
    }

    #[test]
    fn test_threshold_outside_percent_range_rejected() {
        for args in [
            ["--threshold", "150"],
            ["--threshold", "-5"],
            ["--seismic", "100.5"],
            ["--flood", "abc"],
        ] {
            let argv = ["hazard-risk-lstm", "predict", "--input", "w.json", args[0], args[1]];
            assert!(Cli::try_parse_from(argv).is_err(), "{args:?} should be rejected");
        }
    }

    #[test]
    fn test_threshold_bounds_accepted() {
        let cli = Cli::try_parse_from([
            "hazard-risk-lstm", "predict", "--input", "w.json", "--threshold", "0", "--cyclone", "100",
        ]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.thresholds().fallback, 0.0);
        assert_eq!(args.thresholds().cyclone, 100.0);
    }

    #[test]
    fn test_predict_requires_input() {
        assert!(Cli::try_parse_from(["hazard-risk-lstm", "predict"]).is_err());
    }
}
