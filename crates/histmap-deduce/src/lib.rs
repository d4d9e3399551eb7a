//! histmap-deduce - Construction-date deduction
//!
//! Turns one building's chronological detection history into a
//! half-open construction-year interval, with
//! [`OPEN_LOWER`](histmap_core::OPEN_LOWER) and
//! [`OPEN_UPPER`](histmap_core::OPEN_UPPER) on sides no map resolved,
//! and measures how often those intervals agree with registry years.

pub mod config;
pub mod deduce;
pub mod error;
pub mod evaluate;

pub use config::DeduceConfig;
pub use deduce::{area_ratio, deduce};
pub use error::{DeduceError, DeduceResult};
pub use evaluate::{EvaluationSummary, evaluate};
