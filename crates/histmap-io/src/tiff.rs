//! TIFF raster format support
//!
//! Only the first page is read. Bilevel, 8-bit and 16-bit gray, RGB and
//! RGBA images are accepted; everything is reduced to 8-bit gray or RGB.

use crate::{IoError, IoResult};
use histmap_core::{Channels, Raster};
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, RGB8};
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Tag;

/// Read the first page of a TIFF raster.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decoder error: {}", e)))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;

    // PhotometricInterpretation 0 is WhiteIsZero.
    let white_is_zero = matches!(
        decoder.get_tag_u32(Tag::PhotometricInterpretation),
        Ok(0)
    );

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let (channels, samples) = match color_type {
        ColorType::Gray(_) => (Channels::Gray, 1),
        ColorType::GrayA(_) => (Channels::Gray, 2),
        ColorType::RGB(_) => (Channels::Rgb, 3),
        ColorType::RGBA(_) => (Channels::Rgb, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                other
            )));
        }
    };

    let data = match (image_data, color_type) {
        (DecodingResult::U8(buf), ColorType::Gray(1)) => unpack_bilevel(&buf, width, height),
        (DecodingResult::U8(buf), _) => keep_channels(&buf, samples, channels, |v| v),
        (DecodingResult::U16(buf), _) => keep_channels(&buf, samples, channels, |v| (v >> 8) as u8),
        (_, other) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF sample format for {:?}",
                other
            )));
        }
    };
    let data = if white_is_zero && channels == Channels::Gray {
        data.into_iter().map(|v| 255 - v).collect()
    } else {
        data
    };

    Ok(Raster::from_vec(width, height, channels, data)?)
}

/// Expand 1-bit packed rows (MSB first, rows padded to a byte) to 0/255.
fn unpack_bilevel(buf: &[u8], width: u32, height: u32) -> Vec<u8> {
    let bytes_per_row = width.div_ceil(8) as usize;
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let byte = buf.get(y * bytes_per_row + x / 8).copied().unwrap_or(0);
            let bit = (byte >> (7 - (x % 8))) & 1;
            data.push(if bit != 0 { 255 } else { 0 });
        }
    }
    data
}

/// Keep the first `channels` samples of every `samples`-wide pixel.
fn keep_channels<T: Copy>(
    buf: &[T],
    samples: usize,
    channels: Channels,
    to_u8: impl Fn(T) -> u8,
) -> Vec<u8> {
    let keep = channels.count() as usize;
    buf.chunks_exact(samples)
        .flat_map(|px| px[..keep].iter().map(|&v| to_u8(v)))
        .collect()
}

/// Write a TIFF raster with LZW compression.
pub fn write_tiff<W: Write + Seek>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?
        .with_compression(Compression::Lzw);

    let (width, height) = raster.size();
    match raster.channels() {
        Channels::Gray => encoder
            .write_image::<Gray8>(width, height, raster.data())
            .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?,
        Channels::Rgb => encoder
            .write_image::<RGB8>(width, height, raster.data())
            .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?,
    }

    Ok(())
}
