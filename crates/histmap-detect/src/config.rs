//! Detection parameters

use crate::error::{DetectError, DetectResult};
use crate::pattern::OffsetPattern;
use serde::{Deserialize, Serialize};

/// Detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Candidate offsets searched around each position.
    pub pattern: OffsetPattern,
    /// Half size of the cross drawn on the tracking overlay.
    pub marker_half_size: u32,
    /// Search entry positions when the primary position misses.
    pub use_entries: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            pattern: OffsetPattern::default(),
            marker_half_size: 3,
            use_entries: false,
        }
    }
}

impl DetectConfig {
    pub fn validate(&self) -> DetectResult<()> {
        if self.pattern.is_empty() {
            return Err(DetectError::InvalidParameter(
                "pattern must not be empty".to_string(),
            ));
        }
        if self.marker_half_size > 64 {
            return Err(DetectError::InvalidParameter(format!(
                "marker_half_size must be <= 64, got {}",
                self.marker_half_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: DetectConfig = serde_json::from_str(r#"{"use_entries": true}"#).unwrap();
        assert!(cfg.use_entries);
        assert_eq!(cfg.pattern.len(), 29);
        assert_eq!(cfg.marker_half_size, 3);
    }

    #[test]
    fn test_pattern_from_json() {
        let cfg: DetectConfig = serde_json::from_str(r#"{"pattern": [[0, 1], [1, 0]]}"#).unwrap();
        assert_eq!(cfg.pattern.offsets(), &[(0, 1), (1, 0)]);
        assert!(serde_json::from_str::<DetectConfig>(r#"{"pattern": []}"#).is_err());
    }

    #[test]
    fn test_validate_marker_size() {
        let cfg = DetectConfig {
            marker_half_size: 100,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        assert!(DetectConfig::default().validate().is_ok());
    }
}
