//! Connected components
//!
//! A [`Component`] is the duplicate-free pixel list of one 4-connected
//! foreground region. Pixel order follows the traversal and carries no
//! meaning.

use crate::error::RegionResult;
use crate::seedfill::{check_planes, flood_fill};
use histmap_core::{Mask, Point, VisitMask};

/// Pixels of one connected foreground region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    pixels: Vec<Point>,
}

impl Component {
    /// Wrap a pixel list. The caller guarantees it has no duplicates.
    pub fn from_pixels(pixels: Vec<Point>) -> Self {
        Self { pixels }
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel coordinates in traversal order.
    #[inline]
    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.pixels.iter()
    }

    /// Whether `(x, y)` belongs to the component. Linear scan.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.pixels.iter().any(|p| p.x == x && p.y == y)
    }

    /// Pixels sorted row-major, for order-independent comparison.
    pub fn sorted_pixels(&self) -> Vec<Point> {
        let mut pixels = self.pixels.clone();
        pixels.sort_by_key(|p| (p.y, p.x));
        pixels
    }

    /// Paint the component into `mask` as foreground.
    ///
    /// Pixels outside `mask` are skipped.
    pub fn paint(&self, mask: &mut Mask) {
        for p in &self.pixels {
            if mask.contains(p.x, p.y) {
                mask.set_unchecked(p.x, p.y, true);
            }
        }
    }
}

impl IntoIterator for Component {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.into_iter()
    }
}

/// Extract every connected component of at least `min_size` pixels
///
/// Scans the mask row-major and flood-fills from every foreground pixel
/// not yet reached. Components are returned in the order of their first
/// pixel in the scan.
pub fn extract_components(mask: &Mask, min_size: usize) -> RegionResult<Vec<Component>> {
    let mut visit = VisitMask::for_mask(mask);
    extract_components_with(mask, &mut visit, min_size)
}

/// [`extract_components`] with a caller-owned visitation plane.
///
/// Pixels already marked in `visit` are treated as consumed. On return
/// every foreground pixel reachable from an unvisited one is marked,
/// including pixels of components discarded for being too small.
pub fn extract_components_with(
    mask: &Mask,
    visit: &mut VisitMask,
    min_size: usize,
) -> RegionResult<Vec<Component>> {
    check_planes(mask, visit)?;
    let mut components = Vec::new();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !mask.is_foreground(x, y) || visit.is_visited(x, y) {
                continue;
            }
            let component = flood_fill(mask, visit, x, y, false)?;
            if component.len() >= min_size {
                components.push(component);
            }
        }
    }
    Ok(components)
}

/// Count connected components without keeping their pixels.
pub fn count_components(mask: &Mask) -> RegionResult<usize> {
    Ok(extract_components(mask, 1)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(width: u32, height: u32, cells: &[(u32, u32)]) -> Mask {
        let mut mask = Mask::new(width, height).unwrap();
        for &(x, y) in cells {
            mask.set(x, y, true).unwrap();
        }
        mask
    }

    #[test]
    fn test_extract_two_blobs() {
        let mask = mask_with(6, 3, &[(0, 0), (1, 0), (0, 1), (4, 2), (5, 2)]);
        let comps = extract_components(&mask, 1).unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].len(), 3);
        assert_eq!(comps[1].len(), 2);
    }

    #[test]
    fn test_min_size_discards_noise() {
        let mask = mask_with(6, 3, &[(0, 0), (1, 0), (0, 1), (5, 2)]);
        let comps = extract_components(&mask, 2).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(count_components(&mask).unwrap(), 2);
    }

    #[test]
    fn test_paint_roundtrip() {
        let mask = mask_with(4, 4, &[(1, 1), (1, 2), (2, 2)]);
        let comps = extract_components(&mask, 1).unwrap();
        let mut out = Mask::new_like(&mask);
        comps[0].paint(&mut out);
        assert_eq!(out, mask);
        assert_eq!(
            comps[0].sorted_pixels(),
            vec![Point::new(1, 1), Point::new(1, 2), Point::new(2, 2)]
        );
    }
}
