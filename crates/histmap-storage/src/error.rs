//! Error types for histmap-storage

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the storage tree
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster encoding or decoding error
    #[error("raster I/O error: {0}")]
    Raster(#[from] histmap_io::IoError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histmap_core::Error),

    /// Malformed descriptor list line
    #[error("descriptor line {line}: {reason}")]
    DescriptorFormat { line: usize, reason: String },

    /// Registry table lacks a required column
    #[error("registry header has no column '{0}'")]
    MissingColumn(String),

    /// Malformed registry row
    #[error("registry line {line}: {reason}")]
    RegistryFormat { line: usize, reason: String },

    /// Malformed position file
    #[error("position file {path}: {reason}")]
    PositionFormat { path: PathBuf, reason: String },

    /// Building has no position file for a year
    #[error("building {id} has no position for year {year}")]
    MissingPosition { id: String, year: i32 },

    /// No raster stored for a year
    #[error("no {kind} raster for year {year}")]
    MissingFrame { kind: &'static str, year: i32 },

    /// Output directory already holds results of a previous run
    #[error("{} already processed", .0.display())]
    AlreadyProcessed(PathBuf),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
