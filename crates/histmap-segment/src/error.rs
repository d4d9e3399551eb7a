//! Error types for histmap-segment

use thiserror::Error;

/// Errors that can occur during segmentation
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histmap_core::Error),

    /// Connectivity engine error
    #[error("region error: {0}")]
    Region(#[from] histmap_region::RegionError),

    /// Configuration value out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
