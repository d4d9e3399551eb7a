//! Error types for histmap-pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving a stage
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Storage tree error
    #[error("storage error: {0}")]
    Storage(#[from] histmap_storage::StorageError),

    /// Segmentation error
    #[error("segmentation error: {0}")]
    Segment(#[from] histmap_segment::SegmentError),

    /// Detection error
    #[error("detection error: {0}")]
    Detect(#[from] histmap_detect::DetectError),

    /// Deduction error
    #[error("deduction error: {0}")]
    Deduce(#[from] histmap_deduce::DeduceError),

    /// Configuration file could not be read or written
    #[error("config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Raster size disagrees with the descriptor list
    #[error("year {year}: raster is {}x{}, descriptor says {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    SizeMismatch {
        year: i32,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
