//! histmap-segment - Map raster segmentation
//!
//! Turns a raw (possibly colour) map scan into a binary mask in which
//! printed building fills are foreground and roads, labels, and
//! coloured features are background.
//!
//! # Examples
//!
//! ```
//! use histmap_core::{Channels, Raster};
//! use histmap_segment::{SegmentConfig, Segmenter};
//!
//! let raster = Raster::filled(32, 32, Channels::Rgb, 240).unwrap();
//! let segmenter = Segmenter::new(SegmentConfig::default()).unwrap();
//! let (mask, report) = segmenter.run(&raster).unwrap();
//! assert_eq!(mask.count_foreground(), 0);
//! assert_eq!(report.components_found, 0);
//! ```

pub mod classify;
pub mod config;
pub mod erosion;
pub mod error;
pub mod normalize;
pub mod observer;
pub mod regrow;
pub mod segmenter;
pub mod shape;

pub use config::{ClassifyConfig, ErosionConfig, NormalizeConfig, SegmentConfig, ShapeFilterConfig};
pub use error::{SegmentError, SegmentResult};
pub use observer::{NoopObserver, SegmentStage, StageCounts, StageObserver};
pub use segmenter::{SegmentReport, Segmenter};
