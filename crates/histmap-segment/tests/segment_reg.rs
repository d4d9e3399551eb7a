//! Segmentation regression test
//!
//! Covers the erosion subset guarantee, shape filter selectivity,
//! regrowth boundedness, and a full run over a synthetic map.
//!
//! Run with:
//! ```
//! cargo test -p histmap-segment --test segment_reg
//! ```

use histmap_core::{Channels, Mask, Raster};
use histmap_region::extract_components;
use histmap_segment::erosion::{density_erode, erode_until_stable};
use histmap_segment::regrow::regrow;
use histmap_segment::shape::filter_components;
use histmap_segment::{
    ErosionConfig, NoopObserver, SegmentConfig, Segmenter, ShapeFilterConfig, StageCounts,
};
use histmap_test::{RegParams, mask_from_ascii};

/// Deterministic pseudo-random mask with the given fill percentage.
fn noise_mask(width: u32, height: u32, fill: u32, seed: u64) -> Mask {
    let mut state = seed;
    let mut mask = Mask::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if ((state >> 33) % 100) < fill as u64 {
                mask.set_unchecked(x, y, true);
            }
        }
    }
    mask
}

#[test]
fn segment_reg() {
    let mut rp = RegParams::new("segment");

    // --- Erosion never adds foreground
    for (i, fill) in [20, 45, 60, 85].into_iter().enumerate() {
        for kernel in 1..=3 {
            for game_value in [0.1, 0.5, 0.9] {
                let cfg = ErosionConfig {
                    kernel,
                    game_value,
                    max_iterations: 16,
                };
                let mask = noise_mask(40, 30, fill, i as u64 + 7);
                let (once, _) = density_erode(&mask, &cfg);
                let (stable, _) = erode_until_stable(&mask, &cfg, &mut NoopObserver);
                rp.compare_bool(true, once.is_subset_of(&mask));
                rp.compare_bool(true, stable.is_subset_of(&once));
            }
        }
    }

    // --- Shape filter: 8x1 line kept, 5x5 square rejected
    let shapes = mask_from_ascii(&[
        "..............",
        ".########.....",
        "..............",
        "........#####.",
        "........#####.",
        "........#####.",
        "........#####.",
        "........#####.",
    ]);
    let components = extract_components(&shapes, 8).unwrap();
    rp.compare_values(2.0, components.len() as f64, 0.0);
    let kept = filter_components(components, &ShapeFilterConfig::default()).unwrap();
    rp.compare_values(1.0, kept.len() as f64, 0.0);
    rp.compare_values(8.0, kept[0].len() as f64, 0.0);
    rp.compare_bool(true, kept[0].contains(1, 1));

    // --- Regrowth stays inside the window and the classification
    let classified = noise_mask(50, 50, 55, 99);
    let eroded_cfg = ErosionConfig::default();
    let (eroded, _) = erode_until_stable(&classified, &eroded_cfg, &mut NoopObserver);
    let components = extract_components(&eroded, 1).unwrap();
    for tolerance in [0u32, 1, 2, 4] {
        let out = regrow(&components, &classified, tolerance);
        rp.compare_bool(true, out.is_subset_of(&classified));
        rp.compare_bool(true, eroded.is_subset_of(&out));
        let mut bounded = true;
        for y in 0..out.height() {
            for x in 0..out.width() {
                if !out.is_foreground(x, y) {
                    continue;
                }
                let near = components.iter().flat_map(|c| c.iter()).any(|p| {
                    p.x.abs_diff(x) <= tolerance && p.y.abs_diff(y) <= tolerance
                });
                bounded &= near;
            }
        }
        rp.compare_bool(true, bounded);
    }

    // --- Full run: two buildings, a road touching one, a red feature
    let mut map = Raster::filled(60, 40, Channels::Rgb, 240).unwrap().to_mut();
    let mut paint = |x0: u32, y0: u32, x1: u32, y1: u32, rgb: (u8, u8, u8)| {
        for y in y0..y1 {
            for x in x0..x1 {
                map.set_rgb(x, y, rgb.0, rgb.1, rgb.2).unwrap();
            }
        }
    };
    paint(5, 5, 17, 15, (35, 35, 35));
    paint(30, 20, 40, 34, (20, 22, 25));
    // one-pixel dark line joining the buildings
    paint(17, 10, 30, 11, (35, 35, 35));
    paint(17, 10, 18, 25, (35, 35, 35));
    paint(17, 24, 30, 25, (35, 35, 35));
    // dark red patch, not achromatic
    paint(45, 5, 55, 15, (90, 15, 15));
    let map: Raster = map.into();

    let segmenter = Segmenter::new(SegmentConfig::default()).unwrap();
    let mut counts = StageCounts::default();
    let (mask, report) = segmenter.run_observed(&map, &mut counts).unwrap();
    eprintln!("  report: {:?}", report);
    rp.compare_values(2.0, report.components_found as f64, 0.0);
    rp.compare_bool(true, mask.is_foreground(5, 5));
    rp.compare_bool(true, mask.is_foreground(39, 33));
    rp.compare_bool(false, mask.is_foreground(50, 10));
    // the line far from both blocks is gone
    rp.compare_bool(false, mask.is_foreground(23, 10));
    rp.compare_values(2.0, histmap_region::count_components(&mask).unwrap() as f64, 1.0);
    rp.compare_bool(true, report.erosion_passes >= 1);
    rp.write_raster(&map, "map").unwrap();
    rp.write_mask(&mask, "segmented").unwrap();

    assert!(rp.cleanup());
}
