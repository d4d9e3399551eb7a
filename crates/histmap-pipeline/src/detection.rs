//! Detection stage driver
//!
//! Each year is an independent unit of work with its own visitation
//! plane and overlay. Within a year, a building whose positions cannot
//! be read is skipped on its own and the others are still detected.
//! Histories are written only after every year has finished, one
//! building at a time in descriptor order, so the order of lines in a
//! history never depends on scheduling.

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::report::StageReport;
use histmap_core::DetectionRecord;
use histmap_detect::{BuildingPositions, Detector, TrackingOverlay};
use histmap_storage::{RasterDescriptor, Storage};
use rayon::prelude::*;
use std::collections::HashMap;

/// Outcome of one successfully processed year
struct YearDetections {
    records: HashMap<String, DetectionRecord>,
    skipped: Vec<(String, String)>,
}

/// Detect every building on one year, skipping buildings without
/// readable positions.
fn detect_year(
    storage: &Storage,
    detector: &Detector,
    descriptor: &RasterDescriptor,
    ids: &[String],
) -> PipelineResult<YearDetections> {
    let year = descriptor.year;
    let mask = storage.read_segmented(year)?;
    crate::check_size(descriptor, mask.size())?;
    let mask = mask.flipped_vertical();

    let mut buildings = Vec::with_capacity(ids.len());
    let mut skipped = Vec::new();
    for id in ids {
        match storage.read_positions(year, id) {
            Ok(positions) => {
                buildings.push(BuildingPositions::from_positions(id.as_str(), positions));
            }
            Err(e) => skipped.push((format!("building {id} year {year}"), e.to_string())),
        }
    }

    let mut overlay = TrackingOverlay::for_mask(&mask)?;
    let detections = detector.detect_year(&mask, &buildings, year, Some(&mut overlay))?;
    storage.write_overlay(year, &overlay.into_file_raster())?;

    Ok(YearDetections {
        records: detections.into_iter().map(|d| (d.id, d.record)).collect(),
        skipped,
    })
}

/// Detect every linked building on every segmented year
///
/// Refuses to run over the histories of a previous pass unless
/// `config.reset` is set. A failed year is reported and contributes no
/// line to any history; a building skipped on one year misses only that
/// year's line.
///
/// # Errors
///
/// Fails as a whole only if the descriptor list or building list cannot
/// be read, the detect directory cannot be prepared, or a history
/// cannot be written.
pub fn run_detection(storage: &Storage, config: &PipelineConfig) -> PipelineResult<StageReport> {
    let descriptors = storage.read_descriptors()?;
    let ids = storage.building_ids()?;
    let detector = Detector::new(config.detect.clone())?;
    storage.prepare_detection(config.reset)?;

    let outcomes: Vec<(i32, PipelineResult<YearDetections>)> = descriptors
        .par_iter()
        .map(|d| (d.year, detect_year(storage, &detector, d, &ids)))
        .collect();

    let mut report = StageReport::default();
    let mut years = Vec::with_capacity(outcomes.len());
    for (year, outcome) in outcomes {
        match outcome {
            Ok(detections) => {
                report.success();
                for (unit, reason) in &detections.skipped {
                    report.failure(unit.as_str(), reason);
                }
                years.push(detections.records);
            }
            Err(e) => report.failure(format!("year {year}"), e),
        }
    }

    for id in &ids {
        let history: Vec<DetectionRecord> = years
            .iter()
            .filter_map(|records| records.get(id).copied())
            .collect();
        if !history.is_empty() {
            storage.append_history(id, &history)?;
        }
    }

    tracing::info!(%report, buildings = ids.len(), "detection stage finished");
    Ok(report)
}
