//! Raster descriptor list
//!
//! One entry per map year, in processing order:
//!
//! ```text
//! year minX maxX minY maxY width height
//! ```
//!
//! The extent is metric, the size in pixels. Together they define the
//! affine mapping from registry coordinates to pixel coordinates.

use crate::error::{StorageError, StorageResult};
use std::fmt;

/// Geographic extent and pixel size of one map year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterDescriptor {
    pub year: i32,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: u32,
    pub height: u32,
}

impl RasterDescriptor {
    /// Map a metric coordinate to fractional pixel coordinates.
    pub fn metric_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.min_x) / (self.max_x - self.min_x) * self.width as f64,
            (y - self.min_y) / (self.max_y - self.min_y) * self.height as f64,
        )
    }

    /// Whether fractional pixel coordinates fall on the raster.
    pub fn contains_pixel(&self, u: f64, v: f64) -> bool {
        u >= 0.0 && v >= 0.0 && u < self.width as f64 && v < self.height as f64
    }

    /// Pixels per metre along x.
    pub fn scale(&self) -> f64 {
        self.width as f64 / (self.max_x - self.min_x)
    }

    /// Whether a loaded raster has the declared size.
    pub fn matches_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl fmt::Display for RasterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.year, self.min_x, self.max_x, self.min_y, self.max_y, self.width, self.height
        )
    }
}

fn format_error(line: usize, reason: impl Into<String>) -> StorageError {
    StorageError::DescriptorFormat {
        line,
        reason: reason.into(),
    }
}

fn number<T: std::str::FromStr>(line: usize, token: &str, name: &str) -> StorageResult<T> {
    token
        .parse()
        .map_err(|_| format_error(line, format!("invalid {name} '{token}'")))
}

/// Parse a descriptor list. Blank lines are skipped; `line` numbers in
/// errors are 1-based.
///
/// Years must strictly increase from one entry to the next.
pub fn parse_descriptors(text: &str) -> StorageResult<Vec<RasterDescriptor>> {
    let mut list: Vec<RasterDescriptor> = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 7 {
            return Err(format_error(
                line,
                format!("expected 7 fields, found {}", tokens.len()),
            ));
        }
        let d = RasterDescriptor {
            year: number(line, tokens[0], "year")?,
            min_x: number(line, tokens[1], "minX")?,
            max_x: number(line, tokens[2], "maxX")?,
            min_y: number(line, tokens[3], "minY")?,
            max_y: number(line, tokens[4], "maxY")?,
            width: number(line, tokens[5], "width")?,
            height: number(line, tokens[6], "height")?,
        };
        if !(d.max_x > d.min_x && d.max_y > d.min_y) {
            return Err(format_error(line, "empty geographic extent"));
        }
        if d.width == 0 || d.height == 0 {
            return Err(format_error(line, "zero pixel size"));
        }
        if let Some(prev) = list.last().map(|p| p.year)
            && d.year <= prev
        {
            return Err(format_error(
                line,
                format!("year {} does not follow {}", d.year, prev),
            ));
        }
        list.push(d);
    }
    Ok(list)
}

/// Render a descriptor list, one entry per line.
pub fn format_descriptors(list: &[RasterDescriptor]) -> String {
    list.iter().map(|d| format!("{d}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "1899 2600000 2601000 1200000 1200500 2000 1000\n\
                        \n\
                        1950 2600000 2601000 1200000 1200500 4000 2000\n";

    #[test]
    fn test_parse_list() {
        let list = parse_descriptors(LIST).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].year, 1950);
        assert_eq!(list[1].width, 4000);
        assert_eq!(parse_descriptors(&format_descriptors(&list)).unwrap(), list);
    }

    #[test]
    fn test_metric_to_pixel() {
        let list = parse_descriptors(LIST).unwrap();
        let (u, v) = list[0].metric_to_pixel(2600250.0, 1200100.0);
        assert!((u - 500.0).abs() < 1e-9);
        assert!((v - 200.0).abs() < 1e-9);
        assert!(list[0].contains_pixel(u, v));
        assert!(!list[0].contains_pixel(2000.0, 0.0));
        assert!((list[0].scale() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bad_lines() {
        let err = parse_descriptors("1950 1 2 3 4 5\n").unwrap_err();
        assert!(matches!(err, StorageError::DescriptorFormat { line: 1, .. }));
        let err = parse_descriptors("1950 0 1 0 1 10 10\n1960 0 1 0 x 10 10\n").unwrap_err();
        assert!(matches!(err, StorageError::DescriptorFormat { line: 2, .. }));
        assert!(parse_descriptors("1950 5 1 0 1 10 10\n").is_err());
    }

    #[test]
    fn test_years_must_increase() {
        let err = parse_descriptors("1950 0 1 0 1 10 10\n1900 0 1 0 1 10 10\n").unwrap_err();
        match err {
            StorageError::DescriptorFormat { line, reason } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "year 1900 does not follow 1950");
            }
            other => panic!("unexpected error: {other}"),
        }
        let err = parse_descriptors("1900 0 1 0 1 10 10\n\n1900 0 1 0 1 10 10\n").unwrap_err();
        assert!(matches!(err, StorageError::DescriptorFormat { line: 3, .. }));
    }
}
