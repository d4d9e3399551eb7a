//! Timeline scan
//!
//! The history is read once, oldest record first. The scan moves from
//! "no evidence yet" to "seen present" on the first present record, and
//! stops on the first boundary: a present record followed by an absent
//! one, or two present records whose footprints differ by more than the
//! configured ratio. The boundary interval is `[previous year, current
//! year)`. Without a boundary, the unresolved side is left open.

use crate::config::DeduceConfig;
use crate::error::{DeduceError, DeduceResult};
use histmap_core::{DeductionResult, DetectionRecord, OPEN_LOWER, OPEN_UPPER};

/// Scan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    NoEvidenceYet,
    SeenPresent,
}

/// Ratio of the larger footprint to the smaller one.
///
/// One zero area gives infinity, two zero areas give 1.
pub fn area_ratio(a: u32, b: u32) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (0, 0) => 1.0,
        (0, _) => f64::INFINITY,
        _ => hi as f64 / lo as f64,
    }
}

/// Whether the step from `previous` to `current` is a boundary.
fn is_boundary(previous: &DetectionRecord, current: &DetectionRecord, cfg: &DeduceConfig) -> bool {
    previous.present
        && (!current.present || area_ratio(previous.area, current.area) > cfg.area_ratio)
}

/// Deduce a construction-year interval from a chronological history
///
/// # Errors
///
/// - [`DeduceError::EmptyHistory`] for an empty history
/// - [`DeduceError::UnorderedHistory`] when years do not strictly
///   increase, checked up to the boundary
/// - [`DeduceError::InvalidParameter`] for an invalid configuration
///
/// # Examples
///
/// ```
/// use histmap_core::{DeductionResult, DetectionRecord, PixelPos};
/// use histmap_deduce::{DeduceConfig, deduce};
///
/// let p = PixelPos::new(0, 0);
/// let history = [
///     DetectionRecord::present(2010, p, 100),
///     DetectionRecord::present(2015, p, 102),
///     DetectionRecord::absent(2020, p),
/// ];
/// let result = deduce(&history, &DeduceConfig::default()).unwrap();
/// assert_eq!(result, DeductionResult::new(2015, 2020));
/// ```
pub fn deduce(history: &[DetectionRecord], cfg: &DeduceConfig) -> DeduceResult<DeductionResult> {
    cfg.validate()?;
    let first = history.first().ok_or(DeduceError::EmptyHistory)?;

    let mut state = ScanState::NoEvidenceYet;
    let mut previous = first;
    if first.present {
        state = ScanState::SeenPresent;
    }

    for current in &history[1..] {
        if current.year <= previous.year {
            return Err(DeduceError::UnorderedHistory {
                previous: previous.year,
                current: current.year,
            });
        }
        if is_boundary(previous, current, cfg) {
            return Ok(DeductionResult::new(previous.year, current.year));
        }
        if current.present {
            state = ScanState::SeenPresent;
        }
        previous = current;
    }

    let last_year = previous.year;
    Ok(match state {
        ScanState::SeenPresent => DeductionResult::new(OPEN_LOWER, last_year),
        ScanState::NoEvidenceYet => DeductionResult::new(last_year, OPEN_UPPER),
    })
}
