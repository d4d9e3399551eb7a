//! Luminance contrast normalization
//!
//! Rescales the luminance of every pixel around the image mean so that
//! its standard deviation becomes `target_std`. The luminance change is
//! added equally to each channel, which alters darkness but leaves the
//! channel spread (the grayness measure) untouched, up to clamping.

use crate::config::NormalizeConfig;
use crate::error::SegmentResult;
use histmap_core::{Raster, color};

/// Mean and standard deviation of the luminance.
pub fn luminance_stats(raster: &Raster) -> (f64, f64) {
    let (width, height) = raster.size();
    let n = width as f64 * height as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = raster.get_rgb_unchecked(x, y);
            let l = color::luminance(r, g, b) as f64;
            sum += l;
            sum_sq += l * l;
        }
    }
    let mean = sum / n;
    let var = (sum_sq / n - mean * mean).max(0.0);
    (mean, var.sqrt())
}

/// Normalize luminance contrast.
///
/// A flat raster (zero deviation) is returned unchanged.
pub fn normalize(raster: &Raster, config: &NormalizeConfig) -> SegmentResult<Raster> {
    config.validate()?;
    let (mean, std) = luminance_stats(raster);
    if std == 0.0 {
        return Ok(raster.clone());
    }
    let gain = config.target_std / std;

    let (width, height) = raster.size();
    let mut out = raster.to_mut();
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = raster.get_rgb_unchecked(x, y);
            let l = color::luminance(r, g, b) as f64;
            let delta = (mean + (l - mean) * gain - l).round() as i32;
            let shift = |c: u8| (c as i32 + delta).clamp(0, 255) as u8;
            out.set_rgb_unchecked(x, y, shift(r), shift(g), shift(b));
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use histmap_core::Channels;

    #[test]
    fn test_flat_raster_unchanged() {
        let raster = Raster::filled(4, 4, Channels::Rgb, 90).unwrap();
        let out = normalize(&raster, &NormalizeConfig::default()).unwrap();
        assert_eq!(out.data(), raster.data());
    }

    #[test]
    fn test_contrast_stretched() {
        let raster =
            Raster::from_vec(4, 1, Channels::Gray, vec![100, 110, 120, 130]).unwrap();
        let (_, before) = luminance_stats(&raster);
        let out = normalize(&raster, &NormalizeConfig { target_std: 40.0 }).unwrap();
        let (mean, after) = luminance_stats(&out);
        assert!(before < 12.0);
        assert!((after - 40.0).abs() < 1.5);
        assert!((mean - 115.0).abs() < 1.0);
    }

    #[test]
    fn test_spread_preserved() {
        let mut m = Raster::new(2, 1, Channels::Rgb).unwrap().to_mut();
        m.set_rgb(0, 0, 100, 120, 110).unwrap();
        m.set_rgb(1, 0, 150, 170, 160).unwrap();
        let out = normalize(&m.into(), &NormalizeConfig { target_std: 60.0 }).unwrap();
        let (r, g, b) = out.get_rgb(0, 0).unwrap();
        assert_eq!(color::max_channel_spread(r, g, b), 20);
    }
}
