use std::path::Path;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Combination, FoldField, FOLD_COUNT};
use crate::pipeline::executor::StageExecutor;
use crate::pipeline::stage::{evaluation_stage, finetune_stage, Stage};
use crate::recorder::ScoreExtractor;

/// Runs the fine-tune then evaluation stages for one combination.
pub struct PipelineRunner<'a, E, X> {
    config: &'a PipelineConfig,
    imagery_path: &'a Path,
    executor: E,
    extractor: X,
}

impl<'a, E: StageExecutor, X: ScoreExtractor> PipelineRunner<'a, E, X> {
    pub fn new(
        config: &'a PipelineConfig,
        imagery_path: &'a Path,
        executor: E,
        extractor: X,
    ) -> Self {
        Self {
            config,
            imagery_path,
            executor,
            extractor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fine-tune folds 1..=5, then evaluate folds 1..=5, in that order.
    ///
    /// Returns the extracted score per fold (`None` where the output held no
    /// decimal number). The first stage that fails aborts the whole combination
    /// and its error is returned; no later stage runs.
    pub fn run(&mut self, combination: &Combination) -> Result<[Option<f64>; FOLD_COUNT]> {
        for fold in folds() {
            println!("\n--- Fine-tuning Fold {} for bands [{}] ---", fold, combination);
            let stage = finetune_stage(self.config, self.imagery_path, combination, fold);
            announce(&stage);
            self.executor.run(&stage)?;
        }

        let mut scores = [None; FOLD_COUNT];
        for (slot, fold) in scores.iter_mut().zip(folds()) {
            println!("\n--- Evaluating Fold {} for bands [{}] ---", fold, combination);
            let stage = evaluation_stage(self.config, self.imagery_path, combination, fold);
            announce(&stage);
            let output = self.executor.run(&stage)?.unwrap_or_default();

            *slot = self.extractor.extract(&output);
            println!("Extracted Score for Fold {}: {}", fold, FoldField::from(*slot));
            if slot.is_none() {
                warn!(fold, %combination, "no decimal number in evaluation output");
            }
        }

        Ok(scores)
    }
}

fn folds() -> impl Iterator<Item = u8> {
    1..=FOLD_COUNT as u8
}

fn announce(stage: &Stage) {
    println!("Running: {}", stage.command_line());
    info!(kind = %stage.kind, fold = stage.fold, "stage started");
}
