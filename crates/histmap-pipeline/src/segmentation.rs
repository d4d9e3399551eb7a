//! Segmentation stage driver

use crate::config::PipelineConfig;
use crate::dumper::StageDumper;
use crate::error::PipelineResult;
use crate::report::StageReport;
use histmap_segment::{NoopObserver, SegmentReport, Segmenter};
use histmap_storage::{RasterDescriptor, Storage};
use rayon::prelude::*;

fn segment_year(
    storage: &Storage,
    segmenter: &Segmenter,
    descriptor: &RasterDescriptor,
    dump_stages: bool,
) -> PipelineResult<SegmentReport> {
    let year = descriptor.year;
    let raster = storage.read_raw_frame(year)?;
    crate::check_size(descriptor, raster.size())?;

    let (mask, report) = if dump_stages {
        let mut dumper = StageDumper::new(storage, year);
        let out = segmenter.run_observed(&raster, &mut dumper)?;
        tracing::debug!(year, written = dumper.written(), failed = dumper.failed(), "stages dumped");
        out
    } else {
        segmenter.run_observed(&raster, &mut NoopObserver)?
    };
    storage.write_segmented(year, &mask)?;
    Ok(report)
}

/// Segment the raw map of every descriptor year
///
/// Years run in parallel. A year whose raw raster is missing, unreadable,
/// or of the wrong size is reported and skipped.
///
/// # Errors
///
/// Fails as a whole only if the descriptor list cannot be read or the
/// segmentation configuration is invalid.
pub fn run_segmentation(storage: &Storage, config: &PipelineConfig) -> PipelineResult<StageReport> {
    let descriptors = storage.read_descriptors()?;
    let segmenter = Segmenter::new(config.segment.clone())?;

    let outcomes: Vec<(i32, PipelineResult<SegmentReport>)> = descriptors
        .par_iter()
        .map(|d| (d.year, segment_year(storage, &segmenter, d, config.dump_stages)))
        .collect();

    let mut report = StageReport::default();
    for (year, outcome) in outcomes {
        match outcome {
            Ok(seg) => {
                tracing::info!(
                    year,
                    components = seg.components_kept,
                    foreground = seg.regrown,
                    "year segmented"
                );
                report.success();
            }
            Err(e) => report.failure(format!("year {year}"), e),
        }
    }
    tracing::info!(%report, "segmentation stage finished");
    Ok(report)
}
