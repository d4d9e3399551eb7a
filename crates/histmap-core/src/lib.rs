//! Histmap Core - Basic data structures for historical map dating
//!
//! This crate provides the fundamental data structures shared by every
//! stage of the pipeline:
//!
//! - [`Raster`] / [`RasterMut`] - The map image container (immutable / mutable)
//! - [`Mask`] - Binary foreground plane produced by segmentation
//! - [`VisitMask`] - Visitation plane owned by one flood-fill user
//! - [`Point`] / [`PixelPos`] - Pixel coordinates
//! - [`DetectionRecord`] / [`DeductionResult`] - Per-building timeline records

pub mod error;
pub mod mask;
pub mod point;
pub mod raster;
pub mod record;

pub use error::{Error, Result};
pub use mask::{DEFAULT_CUTOFF, Mask, VisitMask};
pub use point::{PixelPos, Point};
pub use raster::{Channels, Raster, RasterMut};
pub use record::{DeductionResult, DetectionRecord, OPEN_LOWER, OPEN_UPPER, parse_history};

/// Colour helpers for 8-bit RGB triples.
pub mod color {
    /// Integer luminance, ITU-R BT.601 weights in 8.8 fixed point.
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
        ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
    }

    /// Largest absolute difference between any two channels.
    ///
    /// Zero for a perfectly achromatic pixel.
    #[inline]
    pub fn max_channel_spread(r: u8, g: u8, b: u8) -> u8 {
        let hi = r.max(g).max(b);
        let lo = r.min(g).min(b);
        hi - lo
    }

    /// Squared Euclidean norm of the colour vector.
    #[inline]
    pub fn squared_norm(r: u8, g: u8, b: u8) -> u32 {
        let (r, g, b) = (r as u32, g as u32, b as u32);
        r * r + g * g + b * b
    }

}
