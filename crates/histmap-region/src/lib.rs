//! histmap-region - Connectivity engine for histmap
//!
//! This crate provides the pixel-connectivity primitives shared by
//! segmentation and detection:
//!
//! - **Seed fill** - 4-connected flood fill over a [`Mask`](histmap_core::Mask),
//!   tracked in a caller-owned [`VisitMask`](histmap_core::VisitMask)
//! - **Connected components** - extraction with a minimum size
//! - **Component geometry** - bounds, centroid, covariance eigenvalues
//! - **Integral image** - constant-time window counts
//!
//! # Examples
//!
//! ```
//! use histmap_core::Mask;
//! use histmap_region::extract_components;
//!
//! let mut mask = Mask::new(10, 10).unwrap();
//! mask.set(1, 1, true).unwrap();
//! mask.set(2, 1, true).unwrap();
//! mask.set(7, 7, true).unwrap();
//!
//! let components = extract_components(&mask, 1).unwrap();
//! assert_eq!(components.len(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod geometry;
pub mod integral;
pub mod seedfill;

pub use conncomp::{Component, count_components, extract_components, extract_components_with};
pub use error::{RegionError, RegionResult};
pub use geometry::{Bounds, Covariance};
pub use integral::IntegralImage;
pub use seedfill::{component_area, flood_fill};
