//! Seed fill over a binary mask
//!
//! The fill never writes to the subject [`Mask`]; progress is tracked
//! in a caller-owned [`VisitMask`]. A pixel is admitted iff it is
//! in-bounds, foreground, and unvisited, and it is marked visited the
//! moment it is queued, so each pixel enters the queue at most once.

use crate::conncomp::Component;
use crate::error::{RegionError, RegionResult};
use histmap_core::{Mask, Point, VisitMask};
use std::collections::VecDeque;

/// Check that the visitation plane matches the subject mask.
pub(crate) fn check_planes(mask: &Mask, visit: &VisitMask) -> RegionResult<()> {
    if mask.size() != visit.size() {
        return Err(RegionError::DimensionMismatch {
            mask: mask.size(),
            visit: visit.size(),
        });
    }
    Ok(())
}

/// Flood fill the 4-connected foreground region containing a seed
///
/// Breadth-first traversal from `(seed_x, seed_y)` over up/down/left/right
/// neighbours. Every returned pixel is left marked in `visit`, unless
/// `erase_after` is set, in which case `visit` is restored to its
/// state before the call.
///
/// A seed that is background or already visited yields an empty
/// component and leaves `visit` untouched.
///
/// # Errors
///
/// Returns [`RegionError::InvalidSeed`] if the seed is outside the mask
/// and [`RegionError::DimensionMismatch`] if the planes differ in size.
///
/// # Examples
///
/// ```
/// use histmap_core::{Mask, VisitMask};
/// use histmap_region::flood_fill;
///
/// let mut mask = Mask::new(4, 4).unwrap();
/// mask.set(1, 1, true).unwrap();
/// mask.set(2, 1, true).unwrap();
/// let mut visit = VisitMask::for_mask(&mask);
///
/// let component = flood_fill(&mask, &mut visit, 1, 1, true).unwrap();
/// assert_eq!(component.len(), 2);
/// assert_eq!(visit.count_visited(), 0);
/// ```
pub fn flood_fill(
    mask: &Mask,
    visit: &mut VisitMask,
    seed_x: u32,
    seed_y: u32,
    erase_after: bool,
) -> RegionResult<Component> {
    check_planes(mask, visit)?;
    if !mask.contains(seed_x, seed_y) {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }

    if !mask.is_foreground(seed_x, seed_y) || visit.is_visited(seed_x, seed_y) {
        return Ok(Component::default());
    }

    let (width, height) = mask.size();
    let mut pixels = Vec::new();
    let mut queue = VecDeque::new();
    visit.mark(seed_x, seed_y);
    queue.push_back(Point::new(seed_x, seed_y));

    while let Some(p) = queue.pop_front() {
        pixels.push(p);

        let mut admit = |x: u32, y: u32| {
            if mask.is_foreground(x, y) && !visit.is_visited(x, y) {
                visit.mark(x, y);
                queue.push_back(Point::new(x, y));
            }
        };
        if p.x > 0 {
            admit(p.x - 1, p.y);
        }
        if p.x + 1 < width {
            admit(p.x + 1, p.y);
        }
        if p.y > 0 {
            admit(p.x, p.y - 1);
        }
        if p.y + 1 < height {
            admit(p.x, p.y + 1);
        }
    }

    if erase_after {
        for p in &pixels {
            visit.unmark(p.x, p.y);
        }
    }

    Ok(Component::from_pixels(pixels))
}

/// Footprint size of the region containing a seed, leaving `visit` as found.
///
/// Shorthand for `flood_fill(mask, visit, x, y, true)?.len()`.
pub fn component_area(
    mask: &Mask,
    visit: &mut VisitMask,
    seed_x: u32,
    seed_y: u32,
) -> RegionResult<usize> {
    Ok(flood_fill(mask, visit, seed_x, seed_y, true)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus_mask() -> Mask {
        let mut mask = Mask::new(5, 5).unwrap();
        for (x, y) in [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)] {
            mask.set(x, y, true).unwrap();
        }
        // diagonal neighbour, not 4-connected
        mask.set(4, 4, true).unwrap();
        mask
    }

    #[test]
    fn test_fill_is_four_connected() {
        let mask = plus_mask();
        let mut visit = VisitMask::for_mask(&mask);
        let c = flood_fill(&mask, &mut visit, 2, 2, false).unwrap();
        assert_eq!(c.len(), 5);
        assert!(!c.contains(4, 4));
        assert_eq!(visit.count_visited(), 5);
    }

    #[test]
    fn test_background_seed_is_empty() {
        let mask = plus_mask();
        let mut visit = VisitMask::for_mask(&mask);
        let c = flood_fill(&mask, &mut visit, 0, 0, false).unwrap();
        assert!(c.is_empty());
        assert_eq!(visit.count_visited(), 0);
    }

    #[test]
    fn test_visited_seed_is_empty() {
        let mask = plus_mask();
        let mut visit = VisitMask::for_mask(&mask);
        flood_fill(&mask, &mut visit, 2, 2, false).unwrap();
        let again = flood_fill(&mask, &mut visit, 2, 1, false).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mask = plus_mask();
        let mut visit = VisitMask::for_mask(&mask);
        assert!(matches!(
            flood_fill(&mask, &mut visit, 5, 0, false),
            Err(RegionError::InvalidSeed { x: 5, y: 0 })
        ));
    }

    #[test]
    fn test_plane_size_mismatch() {
        let mask = plus_mask();
        let mut visit = VisitMask::new(4, 5).unwrap();
        assert!(matches!(
            flood_fill(&mask, &mut visit, 2, 2, false),
            Err(RegionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_component_area_restores_visit() {
        let mask = plus_mask();
        let mut visit = VisitMask::for_mask(&mask);
        visit.mark(4, 4);
        let before = visit.clone();
        assert_eq!(component_area(&mask, &mut visit, 1, 2).unwrap(), 5);
        assert_eq!(visit, before);
    }
}
