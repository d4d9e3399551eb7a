//! histmap-detect - Building detection on segmented maps
//!
//! Given a year's segmented mask and the pixel positions linked to each
//! registered building, decides whether the building is printed on that
//! map and measures its connected footprint.
//!
//! - [`OffsetPattern`] - ordered search offsets around a position
//! - [`Detector`] - per-building and per-year detection
//! - [`TrackingOverlay`] - colour-coded markers for visual checks
//!
//! # Examples
//!
//! ```
//! use histmap_core::{Mask, PixelPos};
//! use histmap_detect::{BuildingPositions, DetectConfig, Detector};
//!
//! let mut mask = Mask::new(8, 8).unwrap();
//! mask.set(4, 3, true).unwrap();
//! mask.set(5, 3, true).unwrap();
//!
//! let detector = Detector::new(DetectConfig::default()).unwrap();
//! let buildings = [BuildingPositions::new("1024", PixelPos::new(3, 3))];
//! let out = detector.detect_year(&mask, &buildings, 1950, None).unwrap();
//! assert!(out[0].record.present);
//! assert_eq!(out[0].record.area, 2);
//! ```

pub mod building;
pub mod config;
pub mod detector;
pub mod error;
pub mod overlay;
pub mod pattern;

pub use building::BuildingPositions;
pub use config::DetectConfig;
pub use detector::{BuildingDetection, Detector};
pub use error::{DetectError, DetectResult};
pub use overlay::{ABSENT_COLOR, PRESENT_COLOR, TrackingOverlay};
pub use pattern::OffsetPattern;
