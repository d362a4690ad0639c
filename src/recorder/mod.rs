mod aggregate;
mod extract;
mod log;

pub use aggregate::aggregate;
pub use extract::{LastDecimalExtractor, ScoreExtractor};
pub use log::{ResultsLog, HEADER};
