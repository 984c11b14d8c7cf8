// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to Layer 2.
//
//   1. `init`    — write a freshly initialised model checkpoint
//   2. `predict` — score windows and print hazard assessments
//   3. `inspect` — print the stored architecture

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InitArgs, InspectArgs, PredictArgs};

use crate::domain::assessment::RiskAssessment;

#[derive(Parser, Debug)]
#[command(
    name = "hazard-risk-lstm",
    version,
    about = "Multi-hazard risk forecasting with a stacked LSTM."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init(args)    => run_init(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    use crate::application::init_use_case::InitUseCase;

    let dir  = args.checkpoint_dir.clone();
    let seed = InitUseCase::new(args.into()).execute()?;
    println!("Model initialised with seed {seed}. Checkpoint saved to '{dir}'.");
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;
    use crate::data::loader::JsonSequenceLoader;

    tracing::info!("Scoring windows from: {}", args.input);

    let use_case    = PredictUseCase::new(args.checkpoint_dir.clone(), args.thresholds())?;
    let assessments = use_case.run(&JsonSequenceLoader::new(&args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessments)?);
    } else {
        for a in &assessments {
            print_assessment(a);
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::infra::checkpoint::CheckpointManager;
    use burn::module::Module;

    let ckpt = CheckpointManager::new(&args.checkpoint_dir);
    let (cfg, model) = ckpt.restore::<burn::backend::NdArray>(&Default::default())?;

    println!("{}", serde_json::to_string_pretty(&cfg)?);
    println!(
        "layers={} input_dim={} hidden_dim={} head_dim={} output_dim={} params={}",
        model.num_layers(), model.input_dim(), model.hidden_dim(),
        model.head_dim(), model.output_dim(), model.num_params(),
    );
    Ok(())
}

fn print_assessment(a: &RiskAssessment) {
    println!("\n{}", a.region);
    for r in &a.risks {
        let severity = r.severity.map_or_else(|| "-".to_string(), |s| s.to_string());
        println!("  {:<10} {:>6.1}%  {}", r.label, r.score * 100.0, severity);
    }
    if let Some(top) = a.highest() {
        println!("  highest: {} ({:.1}%)", top.label, top.score * 100.0);
    }
}
