//! Segmentation parameters
//!
//! Every threshold of the pipeline lives here with its default. All
//! structs deserialize with `#[serde(default)]`, so a partial JSON
//! object only overrides the fields it names.

use crate::error::{SegmentError, SegmentResult};
use serde::{Deserialize, Serialize};

fn invalid(msg: String) -> SegmentError {
    SegmentError::InvalidParameter(msg)
}

/// Luminance contrast normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Luminance standard deviation after normalization.
    pub target_std: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self { target_std: 64.0 }
    }
}

impl NormalizeConfig {
    pub fn validate(&self) -> SegmentResult<()> {
        if !(self.target_std.is_finite() && self.target_std > 0.0) {
            return Err(invalid(format!(
                "normalize.target_std must be > 0, got {}",
                self.target_std
            )));
        }
        Ok(())
    }
}

/// Dark-and-achromatic foreground classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Euclidean norm of the RGB vector must be below this.
    pub distance: u32,
    /// Largest pairwise channel difference must be below this.
    pub grayness: u8,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            distance: 96,
            grayness: 40,
        }
    }
}

impl ClassifyConfig {
    pub fn validate(&self) -> SegmentResult<()> {
        if self.distance == 0 || self.distance > 442 {
            return Err(invalid(format!(
                "classify.distance must be in 1..=442, got {}",
                self.distance
            )));
        }
        if self.grayness == 0 {
            return Err(invalid("classify.grayness must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Density erosion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionConfig {
    /// Half-width of the square density window.
    pub kernel: u32,
    /// Foreground fraction of the window that must be exceeded.
    pub game_value: f64,
    /// Upper bound on passes; iteration stops earlier once stable.
    pub max_iterations: u32,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            kernel: 1,
            game_value: 0.5,
            max_iterations: 16,
        }
    }
}

impl ErosionConfig {
    pub fn validate(&self) -> SegmentResult<()> {
        if self.kernel == 0 {
            return Err(invalid("erosion.kernel must be >= 1".to_string()));
        }
        if !(self.game_value > 0.0 && self.game_value < 1.0) {
            return Err(invalid(format!(
                "erosion.game_value must be in (0, 1), got {}",
                self.game_value
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid("erosion.max_iterations must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Principal-axis elongation filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeFilterConfig {
    /// Major/minor eigenvalue ratio that must be exceeded.
    pub min_ratio: f64,
    /// Floor applied to the minor eigenvalue before dividing.
    pub eigen_floor: f64,
}

impl Default for ShapeFilterConfig {
    fn default() -> Self {
        Self {
            min_ratio: 4.0,
            eigen_floor: 0.01,
        }
    }
}

impl ShapeFilterConfig {
    pub fn validate(&self) -> SegmentResult<()> {
        if !(self.min_ratio.is_finite() && self.min_ratio > 0.0) {
            return Err(invalid(format!(
                "shape_filter.min_ratio must be > 0, got {}",
                self.min_ratio
            )));
        }
        if !(self.eigen_floor.is_finite() && self.eigen_floor > 0.0) {
            return Err(invalid(format!(
                "shape_filter.eigen_floor must be > 0, got {}",
                self.eigen_floor
            )));
        }
        Ok(())
    }
}

/// Complete segmentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Contrast normalization, skipped when `None`.
    pub normalize: Option<NormalizeConfig>,
    pub classify: ClassifyConfig,
    pub erosion: ErosionConfig,
    /// Components smaller than this are noise.
    pub min_component_pixels: usize,
    /// Elongation filter, skipped when `None`.
    pub shape_filter: Option<ShapeFilterConfig>,
    /// Chebyshev radius of the regrowth window.
    pub regrow_tolerance: u32,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            normalize: None,
            classify: ClassifyConfig::default(),
            erosion: ErosionConfig::default(),
            min_component_pixels: 17,
            shape_filter: None,
            regrow_tolerance: 2,
        }
    }
}

impl SegmentConfig {
    /// Check every nested value.
    pub fn validate(&self) -> SegmentResult<()> {
        if let Some(normalize) = &self.normalize {
            normalize.validate()?;
        }
        self.classify.validate()?;
        self.erosion.validate()?;
        if self.min_component_pixels == 0 {
            return Err(invalid("min_component_pixels must be >= 1".to_string()));
        }
        if let Some(shape) = &self.shape_filter {
            shape.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        SegmentConfig::default().validate().unwrap();
        NormalizeConfig::default().validate().unwrap();
        ShapeFilterConfig::default().validate().unwrap();
    }

    #[test]
    fn test_game_value_range() {
        let mut cfg = SegmentConfig::default();
        cfg.erosion.game_value = 1.0;
        assert!(cfg.validate().is_err());
        cfg.erosion.game_value = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_json_overrides() {
        let cfg: SegmentConfig =
            serde_json::from_str(r#"{"erosion": {"kernel": 2}, "shape_filter": {}}"#).unwrap();
        assert_eq!(cfg.erosion.kernel, 2);
        assert_eq!(cfg.erosion.game_value, 0.5);
        assert_eq!(cfg.shape_filter, Some(ShapeFilterConfig::default()));
        assert_eq!(cfg.min_component_pixels, 17);
    }
}
