//! histmap-test - Regression test framework for histmap
//!
//! Every `*_reg.rs` integration test opens a [`RegParams`], records a
//! numbered sequence of checks, and finishes with
//! `assert!(rp.cleanup())`. Two modes are supported:
//!
//! - **Compare**: run every check and report failures (default)
//! - **Display**: additionally write intermediate rasters to `tests/regout`
//!
//! # Usage
//!
//! ```ignore
//! use histmap_test::{RegParams, mask_from_ascii};
//!
//! let mut rp = RegParams::new("seedfill");
//! let mask = mask_from_ascii(&["##.", ".#."]);
//! rp.compare_values(3.0, mask.count_foreground() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use histmap_core::Mask;

/// Build a mask from ASCII art: `#` is foreground, `.` background.
///
/// Row 0 of the mask is the first string.
///
/// # Panics
///
/// Panics if the rows are empty, ragged, or contain other characters.
pub fn mask_from_ascii(rows: &[&str]) -> Mask {
    match try_mask_from_ascii(rows) {
        Ok(mask) => mask,
        Err(e) => panic!("{e}"),
    }
}

/// Fallible form of [`mask_from_ascii`].
pub fn try_mask_from_ascii(rows: &[&str]) -> TestResult<Mask> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut mask = Mask::new(width, height).map_err(|e| TestError::Fixture {
        row: 0,
        message: e.to_string(),
    })?;
    for (y, row) in rows.iter().enumerate() {
        if row.len() as u32 != width {
            return Err(TestError::Fixture {
                row: y,
                message: format!("expected {} columns, found {}", width, row.len()),
            });
        }
        for (x, ch) in row.bytes().enumerate() {
            match ch {
                b'#' => mask.set_unchecked(x as u32, y as u32, true),
                b'.' => {}
                other => {
                    return Err(TestError::Fixture {
                        row: y,
                        message: format!("unexpected character '{}'", other as char),
                    });
                }
            }
        }
    }
    Ok(mask)
}

/// Render a mask back to ASCII art, one string per row.
pub fn mask_to_ascii(mask: &Mask) -> Vec<String> {
    (0..mask.height())
        .map(|y| {
            (0..mask.width())
                .map(|x| if mask.is_foreground(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // histmap-test is at crates/histmap-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
