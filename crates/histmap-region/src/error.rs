//! Error types for histmap-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histmap_core::Error),

    /// Seed outside the mask
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: u32, y: u32 },

    /// Subject and visitation planes differ in size
    #[error("dimension mismatch: mask {}x{}, visit plane {}x{}", .mask.0, .mask.1, .visit.0, .visit.1)]
    DimensionMismatch { mask: (u32, u32), visit: (u32, u32) },

    /// A geometric measure was requested on a component with no pixels
    #[error("empty component: no pixels to measure")]
    EmptyComponent,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
