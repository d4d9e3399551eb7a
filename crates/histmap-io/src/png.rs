//! PNG raster format support

use crate::{IoError, IoResult};
use histmap_core::{Channels, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG raster.
///
/// Palette and sub-byte gray images are expanded to 8 bits, 16-bit
/// samples keep their high byte and alpha is dropped.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let (channels, samples) = match color_type {
        ColorType::Grayscale => (Channels::Gray, 1),
        ColorType::GrayscaleAlpha => (Channels::Gray, 2),
        ColorType::Rgb => (Channels::Rgb, 3),
        ColorType::Rgba => (Channels::Rgb, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG bit depth after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let stride = samples * bytes_per_sample;
    let keep = channels.count() as usize;
    let mut data = Vec::with_capacity(width as usize * height as usize * keep);

    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..];
        for x in 0..width as usize {
            let px = &row[x * stride..];
            // Big-endian 16-bit samples: the first byte is the high byte.
            for c in 0..keep {
                data.push(px[c * bytes_per_sample]);
            }
        }
    }

    Ok(Raster::from_vec(width, height, channels, data)?)
}

/// Write a PNG raster (8-bit gray or RGB).
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_gray_roundtrip() {
        let raster = Raster::from_vec(3, 2, Channels::Gray, vec![0, 10, 20, 30, 40, 255]).unwrap();
        let mut buf = Vec::new();
        write_png(&raster, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.channels(), Channels::Gray);
        assert_eq!(back.data(), raster.data());
    }

    #[test]
    fn test_png_rgb_roundtrip() {
        let data: Vec<u8> = (0..2 * 2 * 3).map(|v| v as u8 * 17).collect();
        let raster = Raster::from_vec(2, 2, Channels::Rgb, data).unwrap();
        let mut buf = Vec::new();
        write_png(&raster, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.size(), (2, 2));
        assert_eq!(back.get_rgb(1, 1), raster.get_rgb(1, 1));
    }

    #[test]
    fn test_png_rgba_drops_alpha() {
        let mut buf = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buf, 1, 1);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[9, 8, 7, 0]).unwrap();
        }
        let raster = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(raster.channels(), Channels::Rgb);
        assert_eq!(raster.get_rgb(0, 0), Some((9, 8, 7)));
    }
}
