use std::fmt;

use crate::models::Combination;
use crate::recorder::aggregate;

/// Cross-validation folds per combination.
pub const FOLD_COUNT: usize = 5;

/// Placeholder written for a fold that never produced a score.
const NOT_APPLICABLE: &str = "N/A";

/// Placeholder written for an unextractable score or an error aggregate.
const ERROR: &str = "Error";

/// Outcome of one combination's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    PartialFailure,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::PartialFailure => "Partial Failure",
            Status::Failed => "Failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per-fold cell of a result row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoldField {
    Score(f64),
    /// Evaluation ran but no decimal number was found in its output.
    Unextractable,
    /// The pipeline aborted before this fold was evaluated.
    NotApplicable,
}

impl From<Option<f64>> for FoldField {
    fn from(score: Option<f64>) -> Self {
        score.map_or(FoldField::Unextractable, FoldField::Score)
    }
}

impl fmt::Display for FoldField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldField::Score(v) => f.write_str(&format_score(*v)),
            FoldField::Unextractable => f.write_str(ERROR),
            FoldField::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Debug formatting keeps the fractional part on whole numbers (`3.0`, not `3`).
fn format_score(value: f64) -> String {
    format!("{:?}", value)
}

/// The logged outcome for one combination. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationResult {
    pub combination: Combination,
    pub folds: [FoldField; FOLD_COUNT],
    /// Mean of all fold scores; `None` when any fold lacks a score.
    pub average: Option<f64>,
    pub status: Status,
}

impl CombinationResult {
    /// Result for a pipeline that ran every stage to completion.
    pub fn from_scores(combination: Combination, scores: [Option<f64>; FOLD_COUNT]) -> Self {
        let (average, status) = aggregate(&scores);
        Self {
            combination,
            folds: scores.map(FoldField::from),
            average,
            status,
        }
    }

    /// Result for a pipeline that aborted on a failing stage.
    pub fn failed(combination: Combination) -> Self {
        Self {
            combination,
            folds: [FoldField::NotApplicable; FOLD_COUNT],
            average: None,
            status: Status::Failed,
        }
    }

    /// Cells in Results Log column order.
    pub fn to_record(&self) -> Vec<String> {
        let mut record: Vec<String> = self
            .combination
            .bands()
            .iter()
            .map(|b| b.to_string())
            .collect();
        record.extend(self.folds.iter().map(|f| f.to_string()));
        record.push(self.average.map_or_else(|| ERROR.to_string(), format_score));
        record.push(self.status.to_string());
        record
    }
}
