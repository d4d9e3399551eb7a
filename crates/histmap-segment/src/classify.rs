//! Foreground classification
//!
//! A pixel is foreground iff it is both dark (colour vector norm below
//! `distance`) and achromatic (channel spread below `grayness`). Gray
//! rasters are read as `(v, v, v)`, so only the darkness test applies.

use crate::config::ClassifyConfig;
use histmap_core::{Mask, Raster, color};

/// Whether a single colour passes both tests.
#[inline]
pub fn is_foreground(r: u8, g: u8, b: u8, config: &ClassifyConfig) -> bool {
    color::squared_norm(r, g, b) < config.distance * config.distance
        && color::max_channel_spread(r, g, b) < config.grayness
}

/// Classify every pixel of `raster`.
pub fn classify(raster: &Raster, config: &ClassifyConfig) -> Mask {
    let (width, height) = raster.size();
    let mut mask = Mask::new_like_raster(raster);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = raster.get_rgb_unchecked(x, y);
            if is_foreground(r, g, b, config) {
                mask.set_unchecked(x, y, true);
            }
        }
    }
    mask
}
