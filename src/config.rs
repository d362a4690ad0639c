use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};
use crate::models::Band;
use crate::sampler::CombinationSampler;

/// Default location of the Results Log.
pub const DEFAULT_RESULTS_PATH: &str = "modelling/dino/random_bands_full_pipeline_results.csv";

/// Fixed parameters passed to the external fine-tune and evaluation stages.
///
/// Every field has a default, so a JSON config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Interpreter used to launch both scripts.
    pub python: String,
    pub finetune_script: PathBuf,
    pub eval_script: PathBuf,
    pub model_name: String,
    pub batch_size: u32,
    /// Imagery-source tag understood by both scripts.
    pub imagery_source: String,
    pub num_epochs: u32,
    /// Evaluation mode tag.
    pub eval_mode: String,
    /// Bands combinations are drawn from.
    pub candidate_bands: Vec<Band>,
    pub results_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            finetune_script: PathBuf::from("modelling/dino/finetune_spatial.py"),
            eval_script: PathBuf::from("modelling/dino/evaluate.py"),
            model_name: "dinov2_vitb14".to_string(),
            batch_size: 1,
            imagery_source: "S".to_string(),
            num_epochs: 20,
            eval_mode: "spatial".to_string(),
            candidate_bands: (1..=13).collect(),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
        }
    }
}

impl PipelineConfig {
    /// Check the config can drive a sweep.
    pub fn validate(&self) -> Result<()> {
        CombinationSampler::new(&self.candidate_bands)?;
        if self.python.trim().is_empty() {
            return Err(SweepError::InvalidConfig("python must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load a pipeline config from a JSON file and validate it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)?;
    let config: PipelineConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.candidate_bands.len(), 13);
        assert_eq!(config.candidate_bands.first(), Some(&1));
        assert_eq!(config.candidate_bands.last(), Some(&13));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"num_epochs": 3, "python": "python3"}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.num_epochs, 3);
        assert_eq!(config.python, "python3");
        assert_eq!(config.model_name, "dinov2_vitb14");
        assert_eq!(config.results_path, PathBuf::from(DEFAULT_RESULTS_PATH));
    }

    #[test]
    fn test_too_few_bands_rejected() {
        let json = r#"{"candidate_bands": [4, 4, 7]}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, SweepError::InvalidConfig(_)));
    }
}
