use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::config::PipelineConfig;
use crate::models::Combination;

/// Which step of the pipeline a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    FineTune,
    Evaluate,
}

impl StageKind {
    /// How the stage's output is handled.
    pub fn mode(&self) -> StageMode {
        match self {
            StageKind::FineTune => StageMode::Streamed,
            StageKind::Evaluate => StageMode::Captured,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::FineTune => f.write_str("fine-tune"),
            StageKind::Evaluate => f.write_str("evaluation"),
        }
    }
}

/// Output handling for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMode {
    /// Output goes straight to the operator's terminal and is not parsed.
    Streamed,
    /// Stdout is buffered and returned for score extraction.
    Captured,
}

/// One external process invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub kind: StageKind,
    pub fold: u8,
    pub program: String,
    pub args: Vec<String>,
}

impl Stage {
    pub fn mode(&self) -> StageMode {
        self.kind.mode()
    }

    /// Human-readable command line, for console output only.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// The process to spawn. Arguments are passed directly, without a shell.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Fine-tune stage for one fold of a combination.
pub fn finetune_stage(
    config: &PipelineConfig,
    imagery_path: &Path,
    combination: &Combination,
    fold: u8,
) -> Stage {
    let mut args = vec![
        config.finetune_script.display().to_string(),
        "--fold".to_string(),
        fold.to_string(),
        "--model_name".to_string(),
        config.model_name.clone(),
        "--imagery_path".to_string(),
        imagery_path.display().to_string(),
        "--batch_size".to_string(),
        config.batch_size.to_string(),
        "--imagery_source".to_string(),
        config.imagery_source.clone(),
        "--num_epochs".to_string(),
        config.num_epochs.to_string(),
        "--grouped_bands".to_string(),
    ];
    args.extend(combination.to_args());

    Stage {
        kind: StageKind::FineTune,
        fold,
        program: config.python.clone(),
        args,
    }
}

/// Evaluation stage for one fold, reading the checkpoint its fine-tune stage saved.
pub fn evaluation_stage(
    config: &PipelineConfig,
    imagery_path: &Path,
    combination: &Combination,
    fold: u8,
) -> Stage {
    let mut args = vec![
        config.eval_script.display().to_string(),
        "--fold".to_string(),
        fold.to_string(),
        "--use_checkpoint".to_string(),
        "--imagery_path".to_string(),
        imagery_path.display().to_string(),
        "--imagery_source".to_string(),
        config.imagery_source.clone(),
        "--mode".to_string(),
        config.eval_mode.clone(),
        "--grouped_bands".to_string(),
    ];
    args.extend(combination.to_args());

    Stage {
        kind: StageKind::Evaluate,
        fold,
        program: config.python.clone(),
        args,
    }
}
