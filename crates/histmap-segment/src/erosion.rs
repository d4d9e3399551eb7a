//! Density erosion
//!
//! For every pixel, the fraction of foreground cells in the square
//! window of half-width `kernel` around it (clamped at the raster edge)
//! is compared with `game_value`. A pixel survives a pass iff it was
//! foreground and that fraction exceeds `game_value`, so each pass
//! yields a subset of its input. Thin bridges between blobs lose their
//! support first, which separates touching structures.

use crate::config::ErosionConfig;
use crate::observer::{SegmentStage, StageObserver};
use histmap_core::Mask;
use histmap_region::IntegralImage;

/// One erosion pass. Returns the output mask and the number of cells
/// that turned background.
pub fn density_erode(mask: &Mask, config: &ErosionConfig) -> (Mask, usize) {
    let integral = IntegralImage::from_mask(mask);
    let mut out = Mask::new_like(mask);
    let mut removed = 0;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !mask.is_foreground(x, y) {
                continue;
            }
            let (count, area) = integral.window(x, y, config.kernel);
            if count as f64 > config.game_value * area as f64 {
                out.set_unchecked(x, y, true);
            } else {
                removed += 1;
            }
        }
    }
    (out, removed)
}

/// Iterate [`density_erode`] until no cell changes or
/// `max_iterations` passes ran.
///
/// Every pass that changed something is reported to `observer` as
/// [`SegmentStage::Erosion`]. Returns the final mask and the number of
/// passes that changed it.
pub fn erode_until_stable(
    mask: &Mask,
    config: &ErosionConfig,
    observer: &mut dyn StageObserver,
) -> (Mask, u32) {
    let mut current = mask.clone();
    let mut passes = 0;
    while passes < config.max_iterations {
        let (next, removed) = density_erode(&current, config);
        if removed == 0 {
            break;
        }
        passes += 1;
        tracing::trace!(pass = passes, removed, "density erosion pass");
        observer.mask(SegmentStage::Erosion(passes), &next);
        current = next;
    }
    (current, passes)
}
