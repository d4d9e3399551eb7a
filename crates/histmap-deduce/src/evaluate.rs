//! Comparison of deduced intervals with registry construction years

use histmap_core::DeductionResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agreement between deduced intervals and registry years
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Buildings with both a deduction and a registry year
    pub evaluated: usize,
    /// Buildings whose registry year falls inside the interval
    pub consistent: usize,
    /// Intervals with an open lower side
    pub open_lower: usize,
    /// Intervals with an open upper side
    pub open_upper: usize,
    /// Intervals bounded on both sides
    pub bounded: usize,
}

impl EvaluationSummary {
    /// Add one building.
    pub fn add(&mut self, result: &DeductionResult, reference_year: i32) {
        self.evaluated += 1;
        if result.contains(reference_year) {
            self.consistent += 1;
        }
        if result.is_open_lower() {
            self.open_lower += 1;
        }
        if result.is_open_upper() {
            self.open_upper += 1;
        }
        if result.is_bounded() {
            self.bounded += 1;
        }
    }

    /// Fraction of consistent buildings, `None` when nothing was evaluated.
    pub fn consistency(&self) -> Option<f64> {
        (self.evaluated > 0).then(|| self.consistent as f64 / self.evaluated as f64)
    }
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} consistent (open lower {}, open upper {}, bounded {})",
            self.consistent, self.evaluated, self.open_lower, self.open_upper, self.bounded
        )
    }
}

/// Summarize `(deduction, registry year)` pairs.
pub fn evaluate<'a, I>(pairs: I) -> EvaluationSummary
where
    I: IntoIterator<Item = (&'a DeductionResult, i32)>,
{
    let mut summary = EvaluationSummary::default();
    for (result, year) in pairs {
        summary.add(result, year);
    }
    summary
}
