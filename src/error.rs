use thiserror::Error;

use crate::pipeline::StageKind;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} stage for fold {fold} failed: {reason}")]
    StageFailed {
        kind: StageKind,
        fold: u8,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SweepError>;
