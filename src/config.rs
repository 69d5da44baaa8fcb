use std::path::{Path, PathBuf};

use crate::data::label::EncodingPolicy;
use crate::data::loader::DEFAULT_LABEL_COLUMN;
use crate::error::{Error, Result};
use crate::train::train_config::TrainConfig;

pub const BATCH_SIZE: usize = 10;
pub const EPOCHS: usize = 100;
pub const HIDDEN_SIZE: usize = 5;
pub const LEARNING_RATE: f64 = 0.06;
/// Sample classified after training.
pub const TEST_INPUT: [f64; 4] = [4.4, 2.9, 1.4, 0.2];

/// Everything one pipeline run needs.
///
/// `Default` yields the iris setup: the dataset bundled with the crate,
/// strict label encoding, batches of 10, 100 epochs, 5 hidden units and a
/// learning rate of 0.06.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub label_column: String,
    pub encoding: EncodingPolicy,
    pub batch_size: usize,
    pub epochs: usize,
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub test_input: Vec<f64>,
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            data_path: default_data_path(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            encoding: EncodingPolicy::Strict,
            batch_size: BATCH_SIZE,
            epochs: EPOCHS,
            hidden_size: HIDDEN_SIZE,
            learning_rate: LEARNING_RATE,
            test_input: TEST_INPUT.to_vec(),
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be at least 1".into()));
        }
        if self.hidden_size == 0 {
            return Err(Error::InvalidConfig("hidden_size must be at least 1".into()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.label_column.is_empty() {
            return Err(Error::InvalidConfig("label_column must not be empty".into()));
        }
        Ok(())
    }

    /// Backend settings derived from this configuration.
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            stop_flag: None,
            seed: self.seed,
        }
    }
}

/// `data/iris.csv` next to the crate's manifest.
pub fn default_data_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("iris.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_iris_setup() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.epochs, 100);
        assert_eq!(config.hidden_size, 5);
        assert_eq!(config.learning_rate, 0.06);
        assert_eq!(config.test_input, vec![4.4, 2.9, 1.4, 0.2]);
        assert_eq!(config.label_column, "species");
        assert_eq!(config.encoding, EncodingPolicy::Strict);
        assert!(config.data_path.ends_with("data/iris.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        for config in [
            PipelineConfig { batch_size: 0, ..Default::default() },
            PipelineConfig { epochs: 0, ..Default::default() },
            PipelineConfig { hidden_size: 0, ..Default::default() },
            PipelineConfig { learning_rate: 0.0, ..Default::default() },
            PipelineConfig { learning_rate: f64::NAN, ..Default::default() },
        ] {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn train_config_carries_seed() {
        let config = PipelineConfig { seed: Some(9), ..Default::default() };
        let train = config.train_config();
        assert_eq!(train.seed, Some(9));
        assert_eq!(train.epochs, 100);
        assert!(train.stop_flag.is_none());
    }
}
