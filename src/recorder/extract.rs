use once_cell::sync::Lazy;
use regex::Regex;

/// Pulls a numeric score out of an evaluation stage's output.
///
/// Implement this to swap the text heuristic for a structured contract, such as
/// reading a result file the evaluation tool writes.
pub trait ScoreExtractor {
    /// Return the score, or `None` when the output holds no usable number.
    fn extract(&self, output: &str) -> Option<f64>;
}

/// Digits, a decimal point, digits. Signs and exponents are not matched.
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+").expect("Invalid decimal regex"));

/// Takes the first decimal number on the last line that contains one.
///
/// Evaluation tools print intermediate numbers as they go and the final metric
/// last, so scanning bottom-up skips the noise.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastDecimalExtractor;

impl ScoreExtractor for LastDecimalExtractor {
    fn extract(&self, output: &str) -> Option<f64> {
        output
            .lines()
            .rev()
            .filter_map(|line| DECIMAL.find(line))
            .find_map(|m| m.as_str().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<f64> {
        LastDecimalExtractor.extract(text)
    }

    #[test]
    fn test_last_line_wins() {
        let text = "step 1: loss 0.31\nstep 2: loss 0.12\nFinal MAE: 4.256";
        assert_eq!(extract(text), Some(4.256));
    }

    #[test]
    fn test_no_decimal_is_none() {
        assert_eq!(extract("epoch 1 of 20\nsaved checkpoint\ndone"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_first_match_on_line() {
        assert_eq!(extract("MAE 2.5 RMSE 3.75"), Some(2.5));
    }

    #[test]
    fn test_skips_trailing_lines_without_numbers() {
        let text = "Fold MAE: 12.034\nWrote predictions to disk\n\n";
        assert_eq!(extract(text), Some(12.034));
    }

    #[test]
    fn test_integers_and_bare_points_ignored() {
        assert_eq!(extract("mae 7.125\nbatch 32 of 40\nversion 3."), Some(7.125));
    }

    #[test]
    fn test_sign_is_dropped() {
        assert_eq!(extract("delta -0.75"), Some(0.75));
    }

    #[test]
    fn test_crlf_output() {
        assert_eq!(extract("loss 0.9\r\nMAE: 1.5\r\n"), Some(1.5));
    }
}
