//! histmap-io - Raster I/O for historical maps
//!
//! Raw map scans and segmented frames are exchanged as PNG or TIFF
//! files. Reading sniffs the format from the file contents; writing
//! takes an explicit [`RasterFormat`] (see [`RasterFormat::from_path`]).
//!
//! Rasters are returned exactly as stored: the north-up flip used by
//! detection is applied by the caller.

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{RasterFormat, detect_format_from_bytes};

use histmap_core::Raster;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read a raster from a file, detecting its format.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path)?;
    read_raster_mem(&data)
}

/// Read a raster from an in-memory file image.
pub fn read_raster_mem(data: &[u8]) -> IoResult<Raster> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        RasterFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "tiff-format")]
        RasterFormat::Tiff => tiff::read_tiff(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Read a raster and reduce it to a single gray channel.
pub fn read_gray<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    Ok(read_raster(path)?.to_gray())
}

/// Write a raster to a file in the given format.
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P, format: RasterFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        RasterFormat::Png => {
            let mut writer = BufWriter::new(File::create(path)?);
            png::write_png(raster, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        #[cfg(feature = "tiff-format")]
        RasterFormat::Tiff => {
            let mut writer = BufWriter::new(File::create(path)?);
            tiff::write_tiff(raster, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Encode a raster into memory.
pub fn write_raster_mem(raster: &Raster, format: RasterFormat) -> IoResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    match format {
        #[cfg(feature = "png-format")]
        RasterFormat::Png => png::write_png(raster, &mut cursor)?,
        #[cfg(feature = "tiff-format")]
        RasterFormat::Tiff => tiff::write_tiff(raster, &mut cursor)?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )));
        }
    }
    Ok(cursor.into_inner())
}
