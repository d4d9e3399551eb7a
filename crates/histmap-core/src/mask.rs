//! Binary planes
//!
//! Two distinct types share the same geometry but never the same role:
//!
//! - [`Mask`] is the subject plane: each cell is foreground (a printed
//!   structure) or background.
//! - [`VisitMask`] is the scratch plane a flood fill marks while it
//!   walks a [`Mask`]. Keeping it a separate type makes it impossible to
//!   hand the visitation plane to an operation expecting the subject.

use crate::error::{Error, Result};
use crate::raster::{Channels, Raster};

/// Gray value at or above which a rendered pixel counts as background.
pub const DEFAULT_CUTOFF: u8 = 128;

/// Binary foreground/background plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Create an all-background mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    /// Create a mask with the same geometry as `other`, all background.
    pub fn new_like(other: &Mask) -> Self {
        Self {
            width: other.width,
            height: other.height,
            cells: vec![false; other.cells.len()],
        }
    }

    /// Create an all-background mask covering `raster`.
    pub fn new_like_raster(raster: &Raster) -> Self {
        let (width, height) = raster.size();
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Classify a rendered raster: pixels darker than `cutoff` are foreground.
    ///
    /// This is how segmented frames are read back from disk, where
    /// structures are printed black on white.
    pub fn from_raster(raster: &Raster, cutoff: u8) -> Self {
        let (width, height) = raster.size();
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = raster.get_rgb_unchecked(x, y);
                cells.push(crate::color::luminance(r, g, b) < cutoff);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Render foreground black (0) and background white (255).
    pub fn to_raster(&self) -> Raster {
        let data = self
            .cells
            .iter()
            .map(|&fg| if fg { 0 } else { 255 })
            .collect();
        Raster::from_validated(self.width, self.height, Channels::Gray, data)
    }

    /// Get the mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether `(x, y)` lies inside the mask.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Whether the signed coordinate `(x, y)` lies inside the mask.
    #[inline]
    pub fn contains_signed(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Foreground test; `false` outside the mask.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.contains(x, y) && self.cells[self.index(x, y)]
    }

    /// Set a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, foreground: bool) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(x, y);
        self.cells[i] = foreground;
        Ok(())
    }

    /// Set a cell without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, foreground: bool) {
        let i = self.index(x, y);
        self.cells[i] = foreground;
    }

    /// Number of foreground cells.
    pub fn count_foreground(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether every foreground cell of `self` is also foreground in `other`.
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.size() == other.size()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(&a, &b)| !a || b)
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Return a copy mirrored top to bottom.
    pub fn flipped_vertical(&self) -> Mask {
        let stride = self.width as usize;
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks_exact(stride).rev() {
            cells.extend_from_slice(row);
        }
        Mask {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Check that `other` has the same geometry.
    pub fn check_same_size(&self, width: u32, height: u32) -> Result<()> {
        if self.size() != (width, height) {
            return Err(Error::DimensionMismatch {
                expected: self.size(),
                actual: (width, height),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Visitation plane used by flood fills
///
/// Owned by one unit of work (one segmentation run, one year's
/// detection pass) and sized once for the raster it tracks.
#[derive(Debug, Clone)]
pub struct VisitMask {
    width: u32,
    height: u32,
    visited: Vec<bool>,
}

impl VisitMask {
    /// Create an all-unvisited plane matching `mask`.
    pub fn for_mask(mask: &Mask) -> Self {
        Self {
            width: mask.width,
            height: mask.height,
            visited: vec![false; mask.cells.len()],
        }
    }

    /// Create an all-unvisited plane of the given size.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            visited: vec![false; width as usize * height as usize],
        })
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Visitation test; `false` outside the plane.
    #[inline]
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.visited[self.index(x, y)]
    }

    /// Mark `(x, y)` visited.
    #[inline]
    pub fn mark(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.visited[i] = true;
    }

    /// Reset `(x, y)` to unvisited.
    #[inline]
    pub fn unmark(&mut self, x: u32, y: u32) {
        let i = self.index(x, y);
        self.visited[i] = false;
    }

    /// Reset every cell to unvisited.
    pub fn clear(&mut self) {
        self.visited.fill(false);
    }

    /// Number of visited cells.
    pub fn count_visited(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PartialEq for VisitMask {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.visited == other.visited
    }
}
