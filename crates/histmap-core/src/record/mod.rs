//! Timeline records
//!
//! A [`DetectionRecord`] is one year's observation of one building; a
//! building's history is the append-ordered list of them. A
//! [`DeductionResult`] is the construction-year interval derived from a
//! complete history.

mod serial;

pub use serial::parse_history;

use crate::point::PixelPos;
use serde::{Deserialize, Serialize};

/// Lower bound meaning "predates the earliest available map".
pub const OPEN_LOWER: i32 = -32768;

/// Upper bound meaning "postdates the latest available map".
pub const OPEN_UPPER: i32 = 32767;

/// One year's detection outcome for one building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Map year
    pub year: i32,
    /// Whether a foreground pixel was found near the nominal position
    pub present: bool,
    /// Matched pixel when present, nominal position otherwise
    pub position: PixelPos,
    /// Connected footprint area in pixels, 0 when absent
    pub area: u32,
}

impl DetectionRecord {
    /// Record of a building found at `position` with footprint `area`.
    pub fn present(year: i32, position: PixelPos, area: u32) -> Self {
        Self {
            year,
            present: true,
            position,
            area,
        }
    }

    /// Record of a building missing around its nominal `position`.
    pub fn absent(year: i32, position: PixelPos) -> Self {
        Self {
            year,
            present: false,
            position,
            area: 0,
        }
    }
}

/// Half-open construction-year interval `[lower, upper)`
///
/// [`OPEN_LOWER`] and [`OPEN_UPPER`] mark sides that no map resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeductionResult {
    pub lower: i32,
    pub upper: i32,
}

impl DeductionResult {
    #[inline]
    pub const fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    /// Whether the lower side is unresolved.
    #[inline]
    pub fn is_open_lower(&self) -> bool {
        self.lower == OPEN_LOWER
    }

    /// Whether the upper side is unresolved.
    #[inline]
    pub fn is_open_upper(&self) -> bool {
        self.upper == OPEN_UPPER
    }

    /// Whether both sides are concrete map years.
    pub fn is_bounded(&self) -> bool {
        !self.is_open_lower() && !self.is_open_upper()
    }

    /// Whether `year` falls in `[lower, upper)`; open sides accept any year.
    pub fn contains(&self, year: i32) -> bool {
        (self.is_open_lower() || self.lower <= year) && (self.is_open_upper() || year < self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_bounded() {
        let r = DeductionResult::new(1950, 1960);
        assert!(r.contains(1950));
        assert!(r.contains(1959));
        assert!(!r.contains(1960));
        assert!(!r.contains(1949));
        assert!(r.is_bounded());
    }

    #[test]
    fn test_contains_open_sides() {
        let r = DeductionResult::new(OPEN_LOWER, 1900);
        assert!(r.contains(1200));
        assert!(!r.contains(1900));
        let r = DeductionResult::new(2000, OPEN_UPPER);
        assert!(r.contains(40000));
        assert!(!r.is_bounded());
    }

    #[test]
    fn test_absent_has_zero_area() {
        let r = DetectionRecord::absent(1980, PixelPos::new(5, 6));
        assert!(!r.present);
        assert_eq!(r.area, 0);
    }
}
