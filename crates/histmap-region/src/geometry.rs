//! Component geometry
//!
//! Bounding box, centroid, and the second-moment (covariance) matrix of
//! a component's pixel coordinates. The covariance eigenvalues measure
//! spread along the principal axes: a line has one large and one near
//! zero eigenvalue, a square or disc two equal ones.

use crate::conncomp::Component;
use crate::error::{RegionError, RegionResult};

/// Inclusive pixel bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Population covariance of pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Covariance {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl Covariance {
    /// Eigenvalues `(major, minor)` of the symmetric 2x2 matrix, major first.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let mean = 0.5 * (self.xx + self.yy);
        let half_diff = 0.5 * (self.xx - self.yy);
        let radius = (half_diff * half_diff + self.xy * self.xy).sqrt();
        (mean + radius, (mean - radius).max(0.0))
    }

    /// Ratio of the major to the minor eigenvalue.
    ///
    /// The minor eigenvalue is raised to `floor` first, so thin lines
    /// give a large finite ratio instead of dividing by zero.
    pub fn eigen_ratio(&self, floor: f64) -> f64 {
        let (major, minor) = self.eigenvalues();
        major / minor.max(floor)
    }
}

impl Component {
    /// Bounding box, or `None` for an empty component.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.pixels().first()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.iter().fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// Mean pixel coordinate, or `None` for an empty component.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let (sx, sy) = self
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        Some((sx / n, sy / n))
    }

    /// Covariance of the pixel coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyComponent`] for an empty component.
    pub fn covariance(&self) -> RegionResult<Covariance> {
        let (cx, cy) = self.centroid().ok_or(RegionError::EmptyComponent)?;
        let n = self.len() as f64;
        let (mut xx, mut xy, mut yy) = (0.0, 0.0, 0.0);
        for p in self.iter() {
            let dx = p.x as f64 - cx;
            let dy = p.y as f64 - cy;
            xx += dx * dx;
            xy += dx * dy;
            yy += dy * dy;
        }
        Ok(Covariance {
            xx: xx / n,
            xy: xy / n,
            yy: yy / n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histmap_core::Point;

    fn rect(w: u32, h: u32) -> Component {
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                pixels.push(Point::new(x + 3, y + 1));
            }
        }
        Component::from_pixels(pixels)
    }

    #[test]
    fn test_bounds_and_centroid() {
        let c = rect(4, 2);
        let b = c.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (3, 1, 6, 2));
        assert_eq!((b.width(), b.height()), (4, 2));
        assert_eq!(c.centroid(), Some((4.5, 1.5)));
    }

    #[test]
    fn test_line_eigenvalues() {
        let cov = rect(8, 1).covariance().unwrap();
        let (major, minor) = cov.eigenvalues();
        assert!((major - 5.25).abs() < 1e-9);
        assert!(minor.abs() < 1e-9);
        assert!(cov.eigen_ratio(0.01) > 500.0);
    }

    #[test]
    fn test_square_is_isotropic() {
        let cov = rect(5, 5).covariance().unwrap();
        let (major, minor) = cov.eigenvalues();
        assert!((major - 2.0).abs() < 1e-9);
        assert!((minor - 2.0).abs() < 1e-9);
        assert!((cov.eigen_ratio(0.01) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_line() {
        let c = Component::from_pixels((0..6).map(|i| Point::new(i, i)).collect());
        let (_, minor) = c.covariance().unwrap().eigenvalues();
        assert!(minor.abs() < 1e-9);
    }

    #[test]
    fn test_empty_component() {
        let c = Component::default();
        assert!(c.bounds().is_none());
        assert!(matches!(c.covariance(), Err(RegionError::EmptyComponent)));
    }
}
