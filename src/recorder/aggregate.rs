use crate::models::Status;

/// Mean of the fold scores and the resulting status.
///
/// The mean is only computed when every fold has a score; otherwise the
/// aggregate is `None` and the status is `PartialFailure`. Fatal pipeline
/// failures never reach here; see `CombinationResult::failed`.
pub fn aggregate(scores: &[Option<f64>]) -> (Option<f64>, Status) {
    let valid: Vec<f64> = scores.iter().flatten().copied().collect();

    if valid.is_empty() || valid.len() < scores.len() {
        return (None, Status::PartialFailure);
    }

    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    (Some(mean), Status::Success)
}
