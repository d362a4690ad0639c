use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Combination, CombinationResult, Status};
use crate::pipeline::{PipelineRunner, StageExecutor};
use crate::recorder::{ResultsLog, ScoreExtractor};
use crate::sampler::CombinationSampler;

/// Configuration for one sweep run.
pub struct SweepConfig {
    /// Number of unique combinations to attempt.
    pub num_combinations: usize,
    pub imagery_path: PathBuf,
    /// Seed for reproducible sampling. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Skip combinations already present in the Results Log.
    pub resume: bool,
    pub pipeline: PipelineConfig,
}

/// Counts and best score from a finished sweep.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepSummary {
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
    /// Lowest Avg_MAE recorded this run.
    pub best: Option<(Combination, f64)>,
    /// The candidate space ran out before the requested count was reached.
    pub exhausted: bool,
}

impl SweepSummary {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.partial + self.failed
    }

    fn record(&mut self, result: &CombinationResult) {
        match result.status {
            Status::Success => self.succeeded += 1,
            Status::PartialFailure => self.partial += 1,
            Status::Failed => self.failed += 1,
        }

        if let Some(avg) = result.average {
            if self.best.is_none_or(|(_, best)| avg < best) {
                self.best = Some((result.combination, avg));
            }
        }
    }
}

/// Sample, run, and log combinations until the requested count is reached
/// or no unseen combinations remain.
///
/// Stage failures are logged as `Failed` rows and the sweep moves on. Errors
/// writing the Results Log abort the sweep.
pub fn run_sweep<E, X>(config: SweepConfig, executor: E, extractor: X) -> Result<SweepSummary>
where
    E: StageExecutor,
    X: ScoreExtractor,
{
    config.pipeline.validate()?;

    let log = ResultsLog::new(&config.pipeline.results_path);
    log.ensure_header()?;

    let mut sampler = CombinationSampler::new(&config.pipeline.candidate_bands)?;
    if config.resume {
        let tried = log.tried_combinations()?;
        println!("Loaded {} previously tried combinations from {:?}", tried.len(), log.path());
        sampler.seed_history(tried);
    }

    let available = sampler.remaining();
    if config.num_combinations > available {
        warn!(
            requested = config.num_combinations,
            available, "requested more combinations than remain untried"
        );
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut runner = PipelineRunner::new(&config.pipeline, &config.imagery_path, executor, extractor);
    let mut summary = SweepSummary::default();

    while summary.attempted() < config.num_combinations {
        let Some(combination) = sampler.next_combination(&mut rng) else {
            summary.exhausted = true;
            println!("No untried band combinations remain; stopping early.");
            break;
        };

        println!("\n=======================================================");
        println!("STARTING FULL PIPELINE FOR BANDS: [{}]", combination);
        println!("=======================================================\n");

        let result = match runner.run(&combination) {
            Ok(scores) => CombinationResult::from_scores(combination, scores),
            Err(e) => {
                println!("Pipeline failed for bands [{}]: {}", combination, e);
                error!(%combination, error = %e, "pipeline failed");
                CombinationResult::failed(combination)
            }
        };

        log.append(&result)?;
        summary.record(&result);

        info!(
            %combination,
            status = %result.status,
            done = summary.attempted(),
            total = config.num_combinations,
            "combination recorded"
        );
        println!("Finished pipeline for [{}]", combination);
    }

    Ok(summary)
}

/// Print the end-of-run summary.
pub fn print_summary(summary: &SweepSummary, log: &ResultsLog) {
    println!("\n=== Sweep Summary ===\n");
    println!("Attempted:       {}", summary.attempted());
    println!("Success:         {}", summary.succeeded);
    println!("Partial Failure: {}", summary.partial);
    println!("Failed:          {}", summary.failed);

    if let Some((combination, avg)) = summary.best {
        println!("Best Avg_MAE:    {:.4} for bands [{}]", avg, combination);
    }
    if summary.exhausted {
        println!("Candidate space exhausted before the requested count.");
    }
    println!("Results appended to {:?}", log.path());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tracks_lowest_average() {
        let mut summary = SweepSummary::default();
        let a = Combination::new(1, 2, 3).unwrap();
        let b = Combination::new(4, 5, 6).unwrap();

        summary.record(&CombinationResult::from_scores(a, [Some(4.0); 5]));
        summary.record(&CombinationResult::from_scores(b, [Some(2.0); 5]));
        summary.record(&CombinationResult::failed(a));

        assert_eq!(summary.attempted(), 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.best, Some((b, 2.0)));
    }
}
