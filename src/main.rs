use clap::Parser;
use tracing_subscriber::EnvFilter;

use band_sweep_rs::cli::Cli;
use band_sweep_rs::config::{load_config, PipelineConfig};
use band_sweep_rs::error::Result;
use band_sweep_rs::pipeline::ProcessExecutor;
use band_sweep_rs::recorder::{LastDecimalExtractor, ResultsLog};
use band_sweep_rs::sweep::{print_summary, run_sweep, SweepConfig};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut pipeline = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            println!("Loaded pipeline config from {:?}", path);
            config
        }
        None => PipelineConfig::default(),
    };
    if let Some(results) = cli.results {
        pipeline.results_path = results;
    }

    let log = ResultsLog::new(&pipeline.results_path);
    let config = SweepConfig {
        num_combinations: cli.num_random_tests,
        imagery_path: cli.imagery_path,
        seed: cli.seed,
        resume: cli.resume,
        pipeline,
    };

    let summary = run_sweep(config, ProcessExecutor, LastDecimalExtractor)?;
    print_summary(&summary, &log);

    Ok(())
}
