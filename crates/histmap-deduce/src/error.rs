//! Error types for histmap-deduce

use thiserror::Error;

/// Errors that can occur during deduction
#[derive(Debug, Error)]
pub enum DeduceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histmap_core::Error),

    /// A building without any detection record
    #[error("empty detection history")]
    EmptyHistory,

    /// Years do not strictly increase along the history
    #[error("detection history not chronological: {current} follows {previous}")]
    UnorderedHistory { previous: i32, current: i32 },

    /// Configuration value out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for deduction operations
pub type DeduceResult<T> = Result<T, DeduceError>;
