//! Region regrowth
//!
//! Erosion trims real footprint pixels along with the bridges it is
//! meant to cut. Regrowth re-admits, around every retained component
//! pixel, the cells within Chebyshev distance `tolerance` that the
//! classifier marked foreground. It never reaches beyond that window
//! and never admits a cell the classifier rejected.

use histmap_core::Mask;
use histmap_region::Component;

/// Regrow `components` inside `classified`.
///
/// Windows are clipped at the mask edge.
pub fn regrow(components: &[Component], classified: &Mask, tolerance: u32) -> Mask {
    let mut out = Mask::new_like(classified);
    let (width, height) = classified.size();
    let t = tolerance as i64;
    for component in components {
        for p in component.iter() {
            let (px, py) = (p.x as i64, p.y as i64);
            let x0 = (px - t).max(0) as u32;
            let y0 = (py - t).max(0) as u32;
            let x1 = (px + t).min(width as i64 - 1) as u32;
            let y1 = (py + t).min(height as i64 - 1) as u32;
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if classified.is_foreground(x, y) {
                        out.set_unchecked(x, y, true);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use histmap_core::Point;

    #[test]
    fn test_regrow_within_window() {
        let mut classified = Mask::new(7, 1).unwrap();
        for x in 0..7 {
            classified.set(x, 0, true).unwrap();
        }
        let seed = Component::from_pixels(vec![Point::new(3, 0)]);
        let out = regrow(&[seed], &classified, 2);
        let row: Vec<bool> = (0..7).map(|x| out.is_foreground(x, 0)).collect();
        assert_eq!(row, vec![false, true, true, true, true, true, false]);
    }

    #[test]
    fn test_regrow_never_adds_rejected() {
        let mut classified = Mask::new(5, 5).unwrap();
        classified.set(2, 2, true).unwrap();
        classified.set(0, 0, true).unwrap();
        let seed = Component::from_pixels(vec![Point::new(2, 2)]);
        let out = regrow(&[seed], &classified, 3);
        assert!(out.is_subset_of(&classified));
        assert_eq!(out.count_foreground(), 2);
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        let mut classified = Mask::new(3, 3).unwrap();
        for x in 0..3 {
            classified.set(x, 1, true).unwrap();
        }
        let seed = Component::from_pixels(vec![Point::new(1, 1)]);
        assert_eq!(regrow(&[seed], &classified, 0).count_foreground(), 1);
    }
}
