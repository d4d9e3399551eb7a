//! Histmap - Building construction dating from historical maps
//!
//! Cross-references a building registry with a time-ordered series of
//! rasterized maps: every building is located on every map year, its
//! printed footprint is measured, and the resulting timeline is turned
//! into an interval bounding its construction year.
//!
//! # Overview
//!
//! - [`segment`] - raw map scans to binary building masks
//! - [`region`] - flood fill and connected components
//! - [`detect`] - per-year building detection
//! - [`deduce`] - construction-interval deduction
//! - [`storage`] - registry import and the on-disk storage tree
//! - [`pipeline`] - stage drivers over a storage tree
//!
//! # Example
//!
//! ```
//! use histmap::{DeductionResult, DetectionRecord, PixelPos};
//! use histmap::deduce::{DeduceConfig, deduce};
//!
//! let p = PixelPos::new(10, 10);
//! let history = [DetectionRecord::present(1950, p, 40), DetectionRecord::absent(1970, p)];
//! let result = deduce(&history, &DeduceConfig::default()).unwrap();
//! assert_eq!(result, DeductionResult::new(1950, 1970));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use histmap_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use histmap_deduce as deduce;
pub use histmap_detect as detect;
pub use histmap_io as io;
pub use histmap_pipeline as pipeline;
pub use histmap_region as region;
pub use histmap_segment as segment;
pub use histmap_storage as storage;
