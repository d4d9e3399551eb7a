//! Error types for histmap-core
//!
//! Provides a unified error type for the raster containers and the
//! timeline records. Each variant captures enough context to report the
//! failing unit of work without exposing internal layout details.

use thiserror::Error;

/// histmap-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raster buffer does not match its declared geometry
    #[error("buffer length {actual} does not match {width}x{height}x{channels}")]
    BufferLength {
        width: u32,
        height: u32,
        channels: u32,
        actual: usize,
    },

    /// Two planes that must share a geometry do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Coordinates outside the raster
    #[error("pixel ({x}, {y}) outside {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Operation requires a specific channel layout
    #[error("unsupported channel layout: expected {expected}, got {actual} channel(s)")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A detection or deduction line could not be parsed
    #[error("malformed record '{line}': {reason}")]
    RecordFormat { line: String, reason: String },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
