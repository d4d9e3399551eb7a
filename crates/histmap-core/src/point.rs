//! Pixel coordinates
//!
//! [`Point`] addresses a pixel known to lie inside a raster.
//! [`PixelPos`] is a signed position that may fall outside it, as
//! nominal positions derived from registry coordinates sometimes do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// In-raster pixel coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset, returning `None` when the result is
    /// negative or does not fit `width x height`.
    pub fn offset_within(self, dx: i32, dy: i32, width: u32, height: u32) -> Option<Point> {
        PixelPos::from(self).offset(dx, dy).to_point(width, height)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed pixel position, possibly outside the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> PixelPos {
        PixelPos {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Convert to an in-raster [`Point`], or `None` outside `width x height`.
    pub fn to_point(self, width: u32, height: u32) -> Option<Point> {
        if self.x < 0 || self.y < 0 {
            return None;
        }
        let (x, y) = (self.x as u32, self.y as u32);
        (x < width && y < height).then_some(Point { x, y })
    }

    /// Truncate fractional pixel coordinates toward zero.
    pub fn from_fractional(x: f64, y: f64) -> PixelPos {
        PixelPos {
            x: x.trunc() as i32,
            y: y.trunc() as i32,
        }
    }
}

impl From<Point> for PixelPos {
    fn from(p: Point) -> Self {
        PixelPos {
            x: p.x as i32,
            y: p.y as i32,
        }
    }
}
