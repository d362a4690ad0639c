pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod recorder;
pub mod sampler;
pub mod sweep;

pub use error::{Result, SweepError};
pub use models::{Combination, CombinationResult, Status};
