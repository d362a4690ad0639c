use std::path::PathBuf;

use clap::Parser;

/// band_sweep — fine-tune and evaluate random spectral band combinations.
#[derive(Parser, Debug)]
#[command(name = "band_sweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the imagery passed to both pipeline scripts.
    #[arg(long, alias = "imagery_path")]
    pub imagery_path: PathBuf,

    /// How many unique random band combinations to test.
    #[arg(long, alias = "num_random_tests", default_value_t = 1)]
    pub num_random_tests: usize,

    /// Results CSV to append to (overrides the config file).
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// JSON file overriding the default pipeline parameters.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducible sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip combinations already recorded in the results CSV.
    #[arg(long)]
    pub resume: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["band_sweep", "--imagery-path", "/data"]).unwrap();
        assert_eq!(cli.imagery_path, PathBuf::from("/data"));
        assert_eq!(cli.num_random_tests, 1);
        assert!(!cli.resume);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_underscore_aliases() {
        let cli = Cli::try_parse_from([
            "band_sweep",
            "--imagery_path",
            "/data",
            "--num_random_tests",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.num_random_tests, 4);
    }

    #[test]
    fn test_imagery_path_required() {
        assert!(Cli::try_parse_from(["band_sweep"]).is_err());
    }
}
