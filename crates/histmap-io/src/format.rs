//! Raster format detection
//!
//! Reads sniff the format from magic bytes; writes pick it from the
//! file extension.

use crate::{IoError, IoResult};
use std::path::Path;

/// Magic numbers for format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Raster file formats understood by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Png,
    Tiff,
}

impl RasterFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Tiff => "tif",
        }
    }

    /// Choose a format from a path's extension (case-insensitive).
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(RasterFormat::Png),
            "tif" | "tiff" => Ok(RasterFormat::Tiff),
            _ => Err(IoError::UnsupportedFormat(format!(
                "no raster format for '{}'",
                path.display()
            ))),
        }
    }
}

/// Detect the raster format from leading bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<RasterFormat> {
    if data.len() < 4 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }
    if data.starts_with(magic::PNG) {
        return Ok(RasterFormat::Png);
    }
    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Ok(RasterFormat::Tiff);
    }
    Err(IoError::UnsupportedFormat("unknown magic bytes".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), RasterFormat::Png);
    }

    #[test]
    fn test_detect_tiff_both_orders() {
        assert_eq!(
            detect_format_from_bytes(&[0x49, 0x49, 0x2A, 0x00, 8]).unwrap(),
            RasterFormat::Tiff
        );
        assert_eq!(
            detect_format_from_bytes(&[0x4D, 0x4D, 0x00, 0x2A, 0]).unwrap(),
            RasterFormat::Tiff
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"BM\0\0\0\0").is_err());
        assert!(detect_format_from_bytes(b"P").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(RasterFormat::from_path("a/1955.TIF").unwrap(), RasterFormat::Tiff);
        assert_eq!(RasterFormat::from_path("x.png").unwrap(), RasterFormat::Png);
        assert!(RasterFormat::from_path("x.jpg").is_err());
        assert!(RasterFormat::from_path("noext").is_err());
    }
}
