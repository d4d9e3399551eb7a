//! Error types for histmap-detect

use thiserror::Error;

/// Errors that can occur during detection
#[derive(Debug, Error)]
pub enum DetectError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histmap_core::Error),

    /// Connectivity engine error
    #[error("region error: {0}")]
    Region(#[from] histmap_region::RegionError),

    /// Building has no linked position for the year being processed
    #[error("building {id} has no position for year {year}")]
    MissingPosition { id: String, year: i32 },

    /// Footprint area does not fit a detection record
    #[error("building {id} on year {year}: footprint of {area} pixels overflows the record")]
    AreaOverflow { id: String, year: i32, area: usize },

    /// Overlay or visitation plane does not match the segmented mask
    #[error("dimension mismatch: mask is {}x{}, got {}x{}", .mask.0, .mask.1, .other.0, .other.1)]
    DimensionMismatch { mask: (u32, u32), other: (u32, u32) },

    /// Configuration value out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;
