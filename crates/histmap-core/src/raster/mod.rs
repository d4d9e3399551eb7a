//! Raster - The map image container
//!
//! A `Raster` is a 2D grid of 8-bit samples with either one (gray) or
//! three (RGB) channels per pixel. Samples are stored row-major and
//! interleaved, row 0 first.
//!
//! # Orientation
//!
//! Map files store their northernmost row first. The detection stage
//! works in a north-up frame where increasing row means increasing
//! northing, obtained with [`Raster::flipped_vertical`]. The same flip
//! converts back before writing.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Sample layout of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale (or binary rendered as gray)
    Gray = 1,
    /// Three-channel colour, stored R, G, B
    Rgb = 3,
}

impl Channels {
    /// Number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone)]
struct RasterData {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl RasterData {
    fn checked(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * channels.count() as usize;
        if data.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                channels: channels.count(),
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count() as usize
    }
}

/// Raster - immutable, cheaply clonable map image
///
/// # Examples
///
/// ```
/// use histmap_core::{Channels, Raster};
///
/// let raster = Raster::new(640, 480, Channels::Rgb).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        let len = width as usize * height as usize * channels.count() as usize;
        Self::from_vec(width, height, channels, vec![0; len])
    }

    /// Create a raster with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        let len = width as usize * height as usize * channels.count() as usize;
        Self::from_vec(width, height, channels, vec![value; len])
    }

    /// Wrap an interleaved row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if the buffer does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_vec(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::checked(width, height, channels, data)?),
        })
    }

    /// Wrap a buffer whose geometry the caller already guarantees.
    pub(crate) fn from_validated(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * channels.count() as usize
        );
        Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                data,
            }),
        }
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the sample layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Samples of row `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.channels.count() as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Number of `Raster` handles sharing this data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Whether two rasters have identical width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.size() == other.size()
    }

    /// Return a copy mirrored top to bottom.
    ///
    /// Applied once after loading a map so that row index grows with
    /// northing, and once more before writing a derived raster back.
    pub fn flipped_vertical(&self) -> Raster {
        let stride = self.inner.width as usize * self.inner.channels.count() as usize;
        let mut data = Vec::with_capacity(self.inner.data.len());
        for row in self.inner.data.chunks_exact(stride).rev() {
            data.extend_from_slice(row);
        }
        Raster::from_validated(self.inner.width, self.inner.height, self.inner.channels, data)
    }

    /// Try to get mutable access to the raster data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of raster data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the sample layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
