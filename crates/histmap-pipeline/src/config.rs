//! Pipeline configuration
//!
//! Groups the parameters of every stage. Loaded from JSON; missing
//! fields keep their defaults, so a file may override a single
//! threshold.

use crate::error::{PipelineError, PipelineResult};
use histmap_deduce::DeduceConfig;
use histmap_detect::DetectConfig;
use histmap_segment::SegmentConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of all stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub segment: SegmentConfig,
    pub detect: DetectConfig,
    pub deduce: DeduceConfig,
    /// Write every segmentation stage under `output/stages/<year>/`.
    pub dump_stages: bool,
    /// Discard results of a previous detection or deduction run
    /// instead of refusing to start.
    pub reset: bool,
    /// Delimiter of the registry tables.
    pub delimiter: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segment: SegmentConfig::default(),
            detect: DetectConfig::default(),
            deduce: DeduceConfig::default(),
            dump_stages: false,
            reset: false,
            delimiter: '\t',
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let config_error = |message: String| PipelineError::Config {
            path: path.to_path_buf(),
            message,
        };
        let contents = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: PipelineConfig =
            serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        let config_error = |message: String| PipelineError::Config {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| config_error(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| config_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| config_error(e.to_string()))
    }

    pub fn validate(&self) -> PipelineResult<()> {
        self.segment.validate()?;
        self.detect.validate()?;
        self.deduce.validate()?;
        Ok(())
    }
}
