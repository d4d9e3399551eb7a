//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a raster
    #[error("failed to write raster '{path}': {message}")]
    RasterWrite { path: String, message: String },

    /// ASCII fixture is not rectangular or uses unknown characters
    #[error("bad ASCII fixture at row {row}: {message}")]
    Fixture { row: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
