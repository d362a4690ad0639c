mod executor;
mod runner;
mod stage;

pub use executor::{ProcessExecutor, StageExecutor};
pub use runner::PipelineRunner;
pub use stage::{evaluation_stage, finetune_stage, Stage, StageKind, StageMode};
