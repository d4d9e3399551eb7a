//! Line-oriented text form of records
//!
//! Detection lines read `year flag x y area`, deduction lines
//! `lower upper`, fields separated by whitespace. Detection lines with
//! the area omitted are accepted and read as area 0.

use super::{DeductionResult, DetectionRecord};
use crate::error::{Error, Result};
use crate::point::PixelPos;
use std::fmt;
use std::str::FromStr;

fn format_error(line: &str, reason: impl Into<String>) -> Error {
    Error::RecordFormat {
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn field<T: FromStr>(line: &str, token: &str, name: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| format_error(line, format!("invalid {name} '{token}'")))
}

impl fmt::Display for DetectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.year, self.present as u8, self.position.x, self.position.y, self.area
        )
    }
}

impl FromStr for DetectionRecord {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 4 && tokens.len() != 5 {
            return Err(format_error(
                line,
                format!("expected 4 or 5 fields, found {}", tokens.len()),
            ));
        }
        let year = field(line, tokens[0], "year")?;
        let present = match tokens[1] {
            "0" => false,
            "1" => true,
            other => return Err(format_error(line, format!("invalid flag '{other}'"))),
        };
        let x = field(line, tokens[2], "x")?;
        let y = field(line, tokens[3], "y")?;
        let area = match tokens.get(4) {
            Some(token) => field(line, token, "area")?,
            None => 0,
        };
        Ok(DetectionRecord {
            year,
            present,
            position: PixelPos::new(x, y),
            area,
        })
    }
}

impl fmt::Display for DeductionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lower, self.upper)
    }
}

impl FromStr for DeductionResult {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(format_error(
                line,
                format!("expected 2 fields, found {}", tokens.len()),
            ));
        }
        Ok(DeductionResult {
            lower: field(line, tokens[0], "lower bound")?,
            upper: field(line, tokens[1], "upper bound")?,
        })
    }
}

/// Parse a whole history, one record per non-blank line.
pub fn parse_history(text: &str) -> Result<Vec<DetectionRecord>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OPEN_UPPER;

    #[test]
    fn test_detection_line_format() {
        let r = DetectionRecord::present(1955, PixelPos::new(120, 44), 310);
        assert_eq!(r.to_string(), "1955 1 120 44 310");
        assert_eq!("1955 1 120 44 310".parse::<DetectionRecord>().unwrap(), r);
    }

    #[test]
    fn test_detection_line_without_area() {
        let r: DetectionRecord = "1970 0 -3 8".parse().unwrap();
        assert!(!r.present);
        assert_eq!(r.position, PixelPos::new(-3, 8));
        assert_eq!(r.area, 0);
    }

    #[test]
    fn test_detection_line_rejected() {
        assert!("1970 2 3 8 1".parse::<DetectionRecord>().is_err());
        assert!("1970 1 3".parse::<DetectionRecord>().is_err());
        assert!("year 1 3 8 1".parse::<DetectionRecord>().is_err());
    }

    #[test]
    fn test_deduction_line() {
        let r: DeductionResult = "2015 32767".parse().unwrap();
        assert_eq!(r.upper, OPEN_UPPER);
        assert_eq!(r.to_string(), "2015 32767");
        assert!("2015".parse::<DeductionResult>().is_err());
    }

    #[test]
    fn test_parse_history_skips_blank_lines() {
        let history = parse_history("2010 1 0 0 100\n\n2020 0 0 0 0\n").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].year, 2020);
    }
}
