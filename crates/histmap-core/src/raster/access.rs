//! Pixel access functions
//!
//! Getters return `None` outside the raster; setters return
//! [`Error::OutOfBounds`]. The `_unchecked` variants panic instead and
//! are meant for loops that already iterate inside the raster.
//!
//! Gray rasters answer colour queries with the sample repeated on all
//! three channels, so callers can treat every raster as RGB.

use super::{Channels, Raster, RasterData, RasterMut};
use crate::color;
use crate::error::{Error, Result};

impl RasterData {
    #[inline]
    fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = self.offset(x, y);
        match self.channels {
            Channels::Gray => {
                let v = self.data[i];
                (v, v, v)
            }
            Channels::Rgb => (self.data[i], self.data[i + 1], self.data[i + 2]),
        }
    }

    #[inline]
    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Raster {
    /// Whether `(x, y)` lies inside the raster.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.inner.contains(x, y)
    }

    /// Get the RGB triple at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner
            .contains(x, y)
            .then(|| self.inner.rgb_at(x, y))
    }

    /// Get the RGB triple without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_rgb_unchecked(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.inner.rgb_at(x, y)
    }

    /// Get the gray value at `(x, y)`; colour pixels are reduced to luminance.
    pub fn get_gray(&self, x: u32, y: u32) -> Option<u8> {
        self.get_rgb(x, y).map(|(r, g, b)| color::luminance(r, g, b))
    }

    /// Convert to a single-channel raster.
    ///
    /// Gray rasters are returned as a shared clone.
    pub fn to_gray(&self) -> Raster {
        match self.inner.channels {
            Channels::Gray => self.clone(),
            Channels::Rgb => {
                let data = self
                    .inner
                    .data
                    .chunks_exact(3)
                    .map(|p| color::luminance(p[0], p[1], p[2]))
                    .collect();
                Raster::from_validated(self.inner.width, self.inner.height, Channels::Gray, data)
            }
        }
    }
}

impl RasterMut {
    /// Whether `(x, y)` lies inside the raster.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.inner.contains(x, y)
    }

    /// Get the RGB triple at `(x, y)`.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner
            .contains(x, y)
            .then(|| self.inner.rgb_at(x, y))
    }

    /// Set the pixel at `(x, y)` from an RGB triple.
    ///
    /// Gray rasters store the luminance of the triple.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if !self.inner.contains(x, y) {
            return Err(self.inner.out_of_bounds(x, y));
        }
        self.set_rgb_unchecked(x, y, r, g, b);
        Ok(())
    }

    /// Set the pixel at `(x, y)` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let i = self.inner.offset(x, y);
        match self.inner.channels {
            Channels::Gray => self.inner.data[i] = color::luminance(r, g, b),
            Channels::Rgb => {
                self.inner.data[i] = r;
                self.inner.data[i + 1] = g;
                self.inner.data[i + 2] = b;
            }
        }
    }

    /// Set a gray value at `(x, y)`, replicated on every channel.
    pub fn set_gray(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        self.set_rgb(x, y, value, value, value)
    }

    /// Set a gray value without bounds checking.
    #[inline]
    pub fn set_gray_unchecked(&mut self, x: u32, y: u32, value: u8) {
        self.set_rgb_unchecked(x, y, value, value, value);
    }
}
