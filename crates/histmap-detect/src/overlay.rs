//! Tracking overlay
//!
//! A black RGB raster of the map size on which every detection leaves a
//! cross: green where the building was found, red where it was not.
//! The overlay is drawn in the north-up orientation used by detection
//! and flipped back before it is written next to the map.

use crate::error::{DetectError, DetectResult};
use histmap_core::{Channels, Mask, PixelPos, Raster, RasterMut};

/// Marker colour for a building found on the map.
pub const PRESENT_COLOR: (u8, u8, u8) = (0, 255, 0);

/// Marker colour for a building missing from the map.
pub const ABSENT_COLOR: (u8, u8, u8) = (255, 0, 0);

/// Colour-coded detection markers for one map year
#[derive(Debug)]
pub struct TrackingOverlay {
    raster: RasterMut,
}

impl TrackingOverlay {
    /// Create an empty overlay.
    pub fn new(width: u32, height: u32) -> DetectResult<Self> {
        Ok(Self {
            raster: Raster::new(width, height, Channels::Rgb)?.to_mut(),
        })
    }

    /// Create an empty overlay covering `mask`.
    pub fn for_mask(mask: &Mask) -> DetectResult<Self> {
        Self::new(mask.width(), mask.height())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    pub(crate) fn check_mask(&self, mask: &Mask) -> DetectResult<()> {
        if self.size() != mask.size() {
            return Err(DetectError::DimensionMismatch {
                mask: mask.size(),
                other: self.size(),
            });
        }
        Ok(())
    }

    /// Draw a cross of half size `half` centred on `position`.
    ///
    /// Arms are clipped at the overlay border; a centre outside the
    /// overlay still draws whatever part of the cross reaches inside.
    pub fn mark(&mut self, position: PixelPos, present: bool, half: u32) {
        let (r, g, b) = if present { PRESENT_COLOR } else { ABSENT_COLOR };
        let (width, height) = self.size();
        let h = half as i32;
        for d in -h..=h {
            for p in [position.offset(d, 0), position.offset(0, d)] {
                if let Some(p) = p.to_point(width, height) {
                    self.raster.set_rgb_unchecked(p.x, p.y, r, g, b);
                }
            }
        }
    }

    /// Colour at `(x, y)`, `None` outside the overlay.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.raster.get_rgb(x, y)
    }

    /// Finish the overlay in detection orientation.
    pub fn into_raster(self) -> Raster {
        self.raster.into()
    }

    /// Finish the overlay flipped back to the orientation of the map file.
    pub fn into_file_raster(self) -> Raster {
        self.into_raster().flipped_vertical()
    }
}
