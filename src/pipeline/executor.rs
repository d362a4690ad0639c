use std::process::{ExitStatus, Stdio};

use tracing::error;

use crate::error::{Result, SweepError};
use crate::pipeline::stage::{Stage, StageMode};

/// Runs stages as blocking external processes.
///
/// Both methods block until the process exits. A non-zero exit is reported as
/// `SweepError::StageFailed`; a process that cannot be launched as `SweepError::Spawn`.
pub trait StageExecutor {
    /// Run with stdout and stderr inherited from the driver.
    fn run_streamed(&mut self, stage: &Stage) -> Result<()>;

    /// Run with stdout captured and returned as text.
    fn run_captured(&mut self, stage: &Stage) -> Result<String>;

    /// Run according to the stage's mode. Captured output is returned as `Some`.
    fn run(&mut self, stage: &Stage) -> Result<Option<String>> {
        match stage.mode() {
            StageMode::Streamed => self.run_streamed(stage).map(|()| None),
            StageMode::Captured => self.run_captured(stage).map(Some),
        }
    }
}

impl<T: StageExecutor + ?Sized> StageExecutor for &mut T {
    fn run_streamed(&mut self, stage: &Stage) -> Result<()> {
        (**self).run_streamed(stage)
    }

    fn run_captured(&mut self, stage: &Stage) -> Result<String> {
        (**self).run_captured(stage)
    }

    fn run(&mut self, stage: &Stage) -> Result<Option<String>> {
        (**self).run(stage)
    }
}

/// Executor that spawns real OS processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl StageExecutor for ProcessExecutor {
    fn run_streamed(&mut self, stage: &Stage) -> Result<()> {
        let status = stage
            .to_command()
            .stdin(Stdio::null())
            .status()
            .map_err(|source| SweepError::Spawn {
                command: stage.command_line(),
                source,
            })?;

        check_status(stage, status, None)
    }

    fn run_captured(&mut self, stage: &Stage) -> Result<String> {
        let output = stage
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SweepError::Spawn {
                command: stage.command_line(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        check_status(stage, output.status, Some(&stderr))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn check_status(stage: &Stage, status: ExitStatus, stderr: Option<&str>) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    let mut reason = format!("`{}` {}", stage.command_line(), status);
    if let Some(stderr) = stderr.map(str::trim).filter(|s| !s.is_empty()) {
        eprintln!("{}", stderr);
        error!(fold = stage.fold, kind = %stage.kind, "stage wrote to stderr before failing");
        reason.push_str(": ");
        reason.push_str(last_line(stderr));
    }

    Err(SweepError::StageFailed {
        kind: stage.kind,
        fold: stage.fold,
        reason,
    })
}

fn last_line(text: &str) -> &str {
    text.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or(text)
}
