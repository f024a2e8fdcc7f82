//! Engine Configuration
//!
//! JSON configuration for a `BenefitCalculator`:
//!
//! ```json
//! {
//!   "data_dir": "data",
//!   "factor_conversions": { "electricity": 0.1316, "natural_gas": 0.0386 },
//!   "prewarm_regions": ["NoEastXXX"]
//! }
//! ```
//!
//! A relative `data_dir` is resolved against the config file's directory.

use crate::conversion::ConversionRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitsConfig {
    /// Directory holding `output__*.csv` tables and the species master list
    pub data_dir: PathBuf,

    #[serde(default)]
    pub factor_conversions: ConversionRegistry,

    /// Regions whose tables are loaded when the calculator is built
    #[serde(default)]
    pub prewarm_regions: Vec<String>,
}

impl BenefitsConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            factor_conversions: ConversionRegistry::default(),
            prewarm_regions: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read benefits config: {:?}", path))?;

        let mut config: BenefitsConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse benefits config JSON: {:?}", path))?;

        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }

        Ok(config)
    }
}
