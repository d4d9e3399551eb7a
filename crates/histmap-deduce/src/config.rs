//! Deduction parameters

use crate::error::{DeduceError, DeduceResult};
use serde::{Deserialize, Serialize};

/// Deduction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeduceConfig {
    /// Footprint ratio (larger over smaller) between two consecutive
    /// present records above which they are taken as different
    /// structures.
    pub area_ratio: f64,
}

impl Default for DeduceConfig {
    fn default() -> Self {
        Self { area_ratio: 4.0 }
    }
}

impl DeduceConfig {
    pub fn validate(&self) -> DeduceResult<()> {
        if !(self.area_ratio.is_finite() && self.area_ratio >= 1.0) {
            return Err(DeduceError::InvalidParameter(format!(
                "area_ratio must be a finite value >= 1, got {}",
                self.area_ratio
            )));
        }
        Ok(())
    }
}
