//! Stage outcome

use std::fmt;

/// Outcome of one stage run
///
/// Units of work (years, buildings) fail independently; a failed unit
/// is named in `failures` and the stage carries on with the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Units processed successfully
    pub processed: usize,
    /// `(unit, reason)` for every skipped unit
    pub failures: Vec<(String, String)>,
}

impl StageReport {
    /// Record a success.
    pub fn success(&mut self) {
        self.processed += 1;
    }

    /// Record and log a failed unit.
    pub fn failure(&mut self, unit: impl Into<String>, reason: impl fmt::Display) {
        let unit = unit.into();
        let reason = reason.to_string();
        tracing::warn!(%unit, %reason, "unit of work skipped");
        self.failures.push((unit, reason));
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} processed, {} failed", self.processed, self.failures.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let mut report = StageReport::default();
        report.success();
        report.failure("year 1900", "no raw raster");
        assert_eq!(report.processed, 1);
        assert!(!report.is_clean());
        assert_eq!(report.to_string(), "1 processed, 1 failed");
    }
}
