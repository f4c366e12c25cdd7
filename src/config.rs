//! Run configuration for the preparation pipeline.
//!
//! There is no process-wide default path or global settings object: a
//! [`PrepConfig`] value is resolved once (defaults, then config file, then
//! CLI flags) and passed explicitly into the pipeline entry points.

use crate::error::{PrepError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the published train partition.
pub const TRAIN_FILE: &str = "train.csv";
/// File name of the published validation partition.
pub const VAL_FILE: &str = "val.csv";
/// File name of the published test partition.
pub const TEST_FILE: &str = "test.csv";

/// Settings for one pipeline run.
///
/// Deserializes from JSON; missing fields take their defaults, so a config
/// file may override only the values it cares about.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PrepConfig {
    /// Raw input CSV (leading row-index column plus the model columns).
    pub input: PathBuf,

    /// Directory the three partition files are published into.
    pub out_dir: PathBuf,

    /// Fraction of rows removed for the test partition in stage one.
    pub test_size: f64,

    /// Fraction of the *original* rows targeted for the validation
    /// partition; stage two rescales it against the post-test remainder.
    pub val_size: f64,

    /// Seed for the stratified shuffles. Same seed, same membership.
    pub seed: u64,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/raw/cs-training.csv"),
            out_dir: PathBuf::from("data/processed"),
            test_size: 0.15,
            val_size: 0.15,
            seed: 42,
        }
    }
}

impl PrepConfig {
    /// Load settings from a JSON file, falling back to defaults for any
    /// field the file omits.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PrepError::InvalidPath(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check split fractions before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PrepError::Config(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if !(self.val_size > 0.0 && self.val_size < 1.0) {
            return Err(PrepError::Config(format!(
                "val_size must be in (0, 1), got {}",
                self.val_size
            )));
        }
        if self.test_size + self.val_size >= 1.0 {
            return Err(PrepError::Config(format!(
                "test_size + val_size must leave room for training data, got {} + {}",
                self.test_size, self.val_size
            )));
        }
        Ok(())
    }

    pub fn train_path(&self) -> PathBuf {
        self.out_dir.join(TRAIN_FILE)
    }

    pub fn val_path(&self) -> PathBuf {
        self.out_dir.join(VAL_FILE)
    }

    pub fn test_path(&self) -> PathBuf {
        self.out_dir.join(TEST_FILE)
    }

    /// Published partition paths in train/val/test order.
    pub fn partition_paths(&self) -> [PathBuf; 3] {
        [self.train_path(), self.val_path(), self.test_path()]
    }
}
