//! Integral image over a binary mask
//!
//! Holds the running count of foreground cells so that the count inside
//! any axis-aligned rectangle is four lookups. Used by window density
//! operators.

use crate::error::{RegionError, RegionResult};
use histmap_core::Mask;

/// Summed-area table of foreground counts
#[derive(Debug, Clone)]
pub struct IntegralImage {
    /// `(width + 1) x (height + 1)`, row 0 and column 0 are zero
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl IntegralImage {
    /// Build the table for `mask`.
    pub fn from_mask(mask: &Mask) -> Self {
        let (width, height) = mask.size();
        let stride = width as usize + 1;
        let mut data = vec![0u32; stride * (height as usize + 1)];
        for y in 0..height as usize {
            let mut row_sum = 0u32;
            for x in 0..width as usize {
                row_sum += mask.cells()[y * width as usize + x] as u32;
                data[(y + 1) * stride + x + 1] = data[y * stride + x + 1] + row_sum;
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Get the width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> u32 {
        self.data[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Foreground count in `[x0, x1) x [y0, y1)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] for an inverted or
    /// out-of-range rectangle.
    pub fn sum_rect(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> RegionResult<u32> {
        if x0 > x1 || y0 > y1 || x1 > self.width || y1 > self.height {
            return Err(RegionError::InvalidParameters(format!(
                "rectangle [{x0}, {x1}) x [{y0}, {y1}) outside {}x{}",
                self.width, self.height
            )));
        }
        Ok(self.at(x1, y1) + self.at(x0, y0) - self.at(x0, y1) - self.at(x1, y0))
    }

    /// Foreground count and cell count of the square window of
    /// half-width `half` centred on `(cx, cy)`, clamped to the mask.
    ///
    /// `(cx, cy)` must lie inside the mask.
    pub fn window(&self, cx: u32, cy: u32, half: u32) -> (u32, u32) {
        let x0 = cx.saturating_sub(half);
        let y0 = cy.saturating_sub(half);
        let x1 = cx.saturating_add(half).saturating_add(1).min(self.width);
        let y1 = cy.saturating_add(half).saturating_add(1).min(self.height);
        let count = self.at(x1, y1) + self.at(x0, y0) - self.at(x0, y1) - self.at(x1, y0);
        (count, (x1 - x0) * (y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(width: u32, height: u32) -> Mask {
        let mut mask = Mask::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_sum_rect_full() {
        let ii = IntegralImage::from_mask(&full(5, 4));
        assert_eq!(ii.sum_rect(0, 0, 5, 4).unwrap(), 20);
        assert_eq!(ii.sum_rect(1, 1, 3, 2).unwrap(), 2);
        assert_eq!(ii.sum_rect(2, 2, 2, 2).unwrap(), 0);
        assert!(ii.sum_rect(0, 0, 6, 1).is_err());
    }

    #[test]
    fn test_window_clamped_at_corner() {
        let ii = IntegralImage::from_mask(&full(5, 5));
        assert_eq!(ii.window(0, 0, 1), (4, 4));
        assert_eq!(ii.window(2, 2, 1), (9, 9));
        assert_eq!(ii.window(4, 2, 2), (15, 15));
    }

    #[test]
    fn test_window_partial() {
        let mut mask = Mask::new(3, 3).unwrap();
        mask.set(1, 1, true).unwrap();
        mask.set(0, 0, true).unwrap();
        let ii = IntegralImage::from_mask(&mask);
        assert_eq!(ii.window(1, 1, 1), (2, 9));
        assert_eq!(ii.window(2, 2, 0), (0, 1));
    }
}
