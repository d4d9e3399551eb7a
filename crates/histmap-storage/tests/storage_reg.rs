//! Storage regression test
//!
//! Bootstraps a storage tree from registry tables, then checks the
//! stored positions, references, frames, histories, and results.
//!
//! Run with:
//! ```
//! cargo test -p histmap-storage --test storage_reg
//! ```

use histmap_core::{DeductionResult, DetectionRecord, OPEN_LOWER, PixelPos};
use histmap_storage::{Registry, Storage, StorageError, link_positions, parse_descriptors};
use histmap_test::{RegParams, mask_from_ascii};

const LIST: &str = "1900 0 100 0 50 200 100\n\
                    1950 0 100 0 50 400 200\n";

const BUILDINGS: &str = "EGID;GKODE;GKODN;GBAUJ\n\
                         11;25;12.5;1921\n\
                         12;99.9;49.9;\n\
                         13;150;10;1960\n";

const ENTRANCES: &str = "EGID;DKODE;DKODN\n\
                         11;26;12.5\n\
                         13;151;10\n";

#[test]
fn storage_reg() {
    let mut rp = RegParams::new("storage");
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::create(dir.path().join("store")).unwrap();

    // --- Bootstrap
    let descriptors = parse_descriptors(LIST).unwrap();
    storage.write_descriptors(&descriptors).unwrap();
    rp.compare_bool(true, storage.read_descriptors().unwrap() == descriptors);

    let mut registry = Registry::read_buildings(BUILDINGS.as_bytes(), ';').unwrap();
    let attached = registry.read_entries(ENTRANCES.as_bytes(), ';').unwrap();
    rp.compare_values(2.0, attached as f64, 0.0);

    let links = link_positions(&descriptors, &registry);
    rp.compare_values(2.0, links.len() as f64, 0.0);
    let written = storage.write_links(&links).unwrap();
    rp.compare_values(2.0, written as f64, 0.0);
    rp.compare_bool(true, storage.building_ids().unwrap() == ["11", "12"]);

    // 25 m of 100 m over 200 px, 12.5 m of 50 m over 100 px
    let p = storage.read_positions(1900, "11").unwrap();
    rp.compare_bool(true, p == [PixelPos::new(50, 25), PixelPos::new(52, 25)]);
    let p = storage.read_positions(1950, "11").unwrap();
    rp.compare_bool(true, p[0] == PixelPos::new(100, 50));
    // 99.9 m lands on pixel 199.8, truncated
    let p = storage.read_positions(1900, "12").unwrap();
    rp.compare_bool(true, p == [PixelPos::new(199, 99)]);
    let text = std::fs::read_to_string(storage.positions_path(1900, "12")).unwrap();
    rp.compare_bool(true, text == "199.800 99.800\n");
    rp.compare_bool(
        true,
        matches!(
            storage.read_positions(1925, "11"),
            Err(StorageError::MissingPosition { year: 1925, .. })
        ),
    );

    rp.compare_bool(true, storage.read_reference("11").unwrap() == Some(1921));
    rp.compare_bool(true, storage.read_reference("12").unwrap().is_none());

    // --- Segmented frames survive the round trip
    let mask = mask_from_ascii(&[
        "......", //
        ".##...", //
        ".##..#", //
        "......", //
    ]);
    storage.write_segmented(1900, &mask).unwrap();
    rp.compare_masks(&mask, &storage.read_segmented(1900).unwrap());
    rp.compare_bool(
        true,
        matches!(
            storage.read_segmented(1950),
            Err(StorageError::MissingFrame { year: 1950, .. })
        ),
    );
    rp.compare_bool(true, storage.raw_frame_path(1900).is_none());

    // --- Histories and results
    storage.prepare_detection(false).unwrap();
    let a = DetectionRecord::present(1900, PixelPos::new(50, 25), 12);
    let b = DetectionRecord::absent(1950, PixelPos::new(100, 50));
    storage.append_history("11", &[a]).unwrap();
    storage.append_history("11", &[b]).unwrap();
    rp.compare_bool(true, storage.read_history("11").unwrap() == [a, b]);
    rp.compare_bool(
        true,
        matches!(
            storage.prepare_detection(false),
            Err(StorageError::AlreadyProcessed(_))
        ),
    );

    storage.prepare_deduction(false).unwrap();
    let r = DeductionResult::new(OPEN_LOWER, 1950);
    storage.write_deduction("12", &r).unwrap();
    rp.compare_bool(true, storage.read_deduction("12").unwrap() == Some(r));
    rp.compare_bool(true, storage.read_deduction("11").unwrap().is_none());

    assert!(rp.cleanup());
}
