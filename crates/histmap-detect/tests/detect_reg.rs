//! Detection regression test
//!
//! Covers search priority, per-offset bounds checks at the raster
//! border, footprint measurement, and the overlay of a full year.
//!
//! Run with:
//! ```
//! cargo test -p histmap-detect --test detect_reg
//! ```

use histmap_core::{DetectionRecord, PixelPos, VisitMask};
use histmap_detect::{
    ABSENT_COLOR, BuildingPositions, DetectConfig, Detector, OffsetPattern, PRESENT_COLOR,
    TrackingOverlay,
};
use histmap_test::{RegParams, mask_from_ascii};

#[test]
fn detect_reg() {
    let mut rp = RegParams::new("detect");

    // --- Priority: (+1,0) and (0,+1) are both foreground
    let cross = mask_from_ascii(&[
        ".....", //
        ".....", //
        "...#.", //
        "..#..", //
        ".....", //
    ]);
    let center = PixelPos::new(2, 2);
    let right_first = OffsetPattern::new(vec![(0, 0), (1, 0), (0, 1)]).unwrap();
    let down_first = OffsetPattern::new(vec![(0, 0), (0, 1), (1, 0)]).unwrap();
    let detector = |pattern| {
        Detector::new(DetectConfig {
            pattern,
            ..Default::default()
        })
        .unwrap()
    };
    let mut visit = VisitMask::for_mask(&cross);
    let b = BuildingPositions::new("1", center);
    let r = detector(right_first).detect_building(&cross, &mut visit, &b, 1900).unwrap();
    rp.compare_values(3.0, r.position.x as f64, 0.0);
    rp.compare_values(2.0, r.position.y as f64, 0.0);
    let r = detector(down_first).detect_building(&cross, &mut visit, &b, 1900).unwrap();
    rp.compare_values(2.0, r.position.x as f64, 0.0);
    rp.compare_values(3.0, r.position.y as f64, 0.0);
    // the default pattern lists (+1,0) before (0,+1)
    let r = detector(OffsetPattern::default())
        .detect_building(&cross, &mut visit, &b, 1900)
        .unwrap();
    rp.compare_bool(true, r.position == PixelPos::new(3, 2));

    // --- Map with two buildings and a border case
    let map = mask_from_ascii(&[
        "##..........", //
        "##..........", //
        "......####..", //
        "......####..", //
        "......#.....", //
        "............", //
        "............", //
        "...........#", //
    ]);
    let buildings = vec![
        // nominal position far outside, nothing reachable
        BuildingPositions::new("outside", PixelPos::new(-20, -20)),
        // nominal position outside, (+2, 0) lands on the corner block
        BuildingPositions::new("corner", PixelPos::new(-2, 0)),
        BuildingPositions::new("block", PixelPos::new(7, 5)),
        BuildingPositions::new("empty", PixelPos::new(2, 6)),
        BuildingPositions::new("edge", PixelPos::new(13, 7)),
    ];
    let det = detector(OffsetPattern::default());
    let mut overlay = TrackingOverlay::for_mask(&map).unwrap();
    let out = det.detect_year(&map, &buildings, 1936, Some(&mut overlay)).unwrap();
    rp.compare_values(5.0, out.len() as f64, 0.0);

    let by_id = |id: &str| out.iter().find(|d| d.id == id).map(|d| d.record).unwrap();
    rp.compare_bool(
        true,
        by_id("outside") == DetectionRecord::absent(1936, PixelPos::new(-20, -20)),
    );
    let corner = by_id("corner");
    rp.compare_bool(true, corner.present);
    rp.compare_values(4.0, corner.area as f64, 0.0);
    let block = by_id("block");
    rp.compare_bool(true, block.present);
    rp.compare_values(9.0, block.area as f64, 0.0);
    rp.compare_bool(true, block.position.y == 4);
    rp.compare_bool(false, by_id("empty").present);
    let edge = by_id("edge");
    rp.compare_bool(true, edge.present);
    rp.compare_bool(true, edge.position == PixelPos::new(11, 7));
    rp.compare_values(1.0, edge.area as f64, 0.0);

    // Records appear in input order
    let ids: Vec<&str> = out.iter().map(|d| d.id.as_str()).collect();
    rp.compare_bool(true, ids == ["outside", "corner", "block", "empty", "edge"]);

    // Overlay: green at matches, red at misses
    rp.compare_bool(true, overlay.get_rgb(7, 4) == Some(PRESENT_COLOR));
    rp.compare_bool(true, overlay.get_rgb(2, 6) == Some(ABSENT_COLOR));
    rp.write_raster(&overlay.into_file_raster(), "overlay").unwrap();

    // Repeated detection gives the same answers
    let again = det.detect_year(&map, &buildings, 1936, None).unwrap();
    rp.compare_bool(true, again == out);

    assert!(rp.cleanup());
}
