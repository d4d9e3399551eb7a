//! Candidate offset patterns
//!
//! Registry coordinates and map rasters never line up exactly, so a
//! building is searched for on a small set of offsets around its
//! nominal position. The pattern is an ordered list: the first offset
//! landing on foreground wins, whatever the distance of later ones.

use crate::error::{DetectError, DetectResult};
use histmap_core::{Mask, PixelPos, Point};
use serde::{Deserialize, Serialize};

/// Ordered list of `(dx, dy)` search offsets
///
/// Serializes as a JSON array of `[dx, dy]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[i32; 2]>", into = "Vec<[i32; 2]>")]
pub struct OffsetPattern {
    offsets: Vec<(i32, i32)>,
}

impl OffsetPattern {
    /// Create a pattern from offsets in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidParameter`] if the list is empty or
    /// repeats an offset.
    pub fn new(offsets: Vec<(i32, i32)>) -> DetectResult<Self> {
        if offsets.is_empty() {
            return Err(DetectError::InvalidParameter(
                "offset pattern must not be empty".to_string(),
            ));
        }
        for (i, o) in offsets.iter().enumerate() {
            if offsets[..i].contains(o) {
                return Err(DetectError::InvalidParameter(format!(
                    "offset ({}, {}) listed twice",
                    o.0, o.1
                )));
            }
        }
        Ok(Self { offsets })
    }

    /// Square of half-width `square` plus axis arms reaching `arm`,
    /// sorted by distance from the centre.
    ///
    /// Equidistant offsets are ordered horizontal-first, then positive
    /// before negative, so `(1, 0)` precedes `(-1, 0)` precedes `(0, 1)`.
    pub fn square_with_arms(square: u32, arm: u32) -> Self {
        let s = square as i32;
        let a = (arm as i32).max(s);
        let mut offsets: Vec<(i32, i32)> = (-s..=s)
            .flat_map(|dx| (-s..=s).map(move |dy| (dx, dy)))
            .collect();
        for d in (s + 1)..=a {
            offsets.extend([(d, 0), (-d, 0), (0, d), (0, -d)]);
        }
        offsets.sort_by_key(|&(dx, dy)| (dx * dx + dy * dy, dy.abs(), -dx, -dy));
        Self { offsets }
    }

    /// Offsets in priority order.
    #[inline]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Candidate positions around `center`, in priority order.
    pub fn candidates(&self, center: PixelPos) -> impl Iterator<Item = PixelPos> + '_ {
        self.offsets
            .iter()
            .map(move |&(dx, dy)| center.offset(dx, dy))
    }

    /// First candidate around `center` that is foreground in `mask`.
    ///
    /// Every candidate is bounds-checked on its own; candidates outside
    /// the mask are skipped.
    pub fn locate(&self, mask: &Mask, center: PixelPos) -> Option<Point> {
        let (width, height) = mask.size();
        self.candidates(center)
            .filter_map(|p| p.to_point(width, height))
            .find(|p| mask.is_foreground(p.x, p.y))
    }
}

impl Default for OffsetPattern {
    /// The 29-offset search area: a 5x5 square plus the four
    /// axis-aligned offsets at distance 3.
    fn default() -> Self {
        Self::square_with_arms(2, 3)
    }
}

impl TryFrom<Vec<[i32; 2]>> for OffsetPattern {
    type Error = DetectError;

    fn try_from(pairs: Vec<[i32; 2]>) -> DetectResult<Self> {
        Self::new(pairs.into_iter().map(|[dx, dy]| (dx, dy)).collect())
    }
}

impl From<OffsetPattern> for Vec<[i32; 2]> {
    fn from(pattern: OffsetPattern) -> Self {
        pattern.offsets.into_iter().map(|(dx, dy)| [dx, dy]).collect()
    }
}
