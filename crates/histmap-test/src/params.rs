//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{mask_to_ascii, regout_dir};
use histmap_core::{Mask, Raster};
use histmap_io::RasterFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run checks and report failures (default)
    #[default]
    Compare,
    /// Also write intermediate rasters for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode, and every
/// recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "seedfill")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters, configured from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two boolean outcomes.
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        let as_f = |b: bool| if b { 1.0 } else { 0.0 };
        self.compare_values(as_f(expected), as_f(actual), 0.0)
    }

    /// Compare two masks cell by cell.
    ///
    /// On mismatch both masks are printed as ASCII when they are small.
    pub fn compare_masks(&mut self, expected: &Mask, actual: &Mask) -> bool {
        self.index += 1;

        if expected.size() != actual.size() {
            let msg = format!(
                "Failure in {}_reg: mask comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                expected.size(),
                actual.size()
            );
            self.fail(msg);
            return false;
        }

        let mismatch = expected
            .cells()
            .iter()
            .zip(actual.cells())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            let w = expected.width() as usize;
            let mut msg = format!(
                "Failure in {}_reg: mask comparison for index {} - first mismatch at ({}, {})",
                self.test_name,
                self.index,
                i % w,
                i / w
            );
            if expected.width() <= 64 && expected.height() <= 64 {
                msg.push_str("\nexpected:\n");
                msg.push_str(&mask_to_ascii(expected).join("\n"));
                msg.push_str("\nactual:\n");
                msg.push_str(&mask_to_ascii(actual).join("\n"));
            }
            self.fail(msg);
            return false;
        }

        true
    }

    /// Compare two rasters sample by sample.
    pub fn compare_rasters(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if expected.size() != actual.size() || expected.channels() != actual.channels() {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - geometry mismatch",
                self.test_name, self.index
            );
            self.fail(msg);
            return false;
        }
        if expected.data() != actual.data() {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - sample mismatch",
                self.test_name, self.index
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Write a raster to `tests/regout` in display mode; no-op otherwise.
    ///
    /// Does not advance the check index.
    pub fn write_raster(&self, raster: &Raster, label: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = format!(
            "{}/{}.{:02}.{}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            label,
            RasterFormat::Png.extension()
        );
        histmap_io::write_raster(raster, &path, RasterFormat::Png).map_err(|e| {
            TestError::RasterWrite {
                path: path.clone(),
                message: e.to_string(),
            }
        })
    }

    /// Write a mask as black-on-white PNG in display mode.
    pub fn write_mask(&self, mask: &Mask, label: &str) -> TestResult<()> {
        self.write_raster(&mask.to_raster(), label)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
