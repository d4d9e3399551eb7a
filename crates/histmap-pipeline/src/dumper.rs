//! Segmentation stage dumps

use histmap_core::{Mask, Raster};
use histmap_segment::{SegmentStage, StageObserver};
use histmap_storage::Storage;

/// Observer writing every stage of one year as `stageN.png`
///
/// Masks are written black on white, in the orientation of the map
/// file. A write failure is logged and does not stop segmentation.
pub struct StageDumper<'a> {
    storage: &'a Storage,
    year: i32,
    written: usize,
    failed: usize,
}

impl<'a> StageDumper<'a> {
    pub fn new(storage: &'a Storage, year: i32) -> Self {
        Self {
            storage,
            year,
            written: 0,
            failed: 0,
        }
    }

    /// Number of stage files written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of stage files that could not be written.
    pub fn failed(&self) -> usize {
        self.failed
    }

    fn dump(&mut self, stage: SegmentStage, raster: &Raster) {
        let index = self.written + self.failed;
        match self.storage.write_stage(self.year, index, raster) {
            Ok(()) => {
                tracing::debug!(year = self.year, index, %stage, "stage written");
                self.written += 1;
            }
            Err(e) => {
                tracing::warn!(year = self.year, index, %stage, error = %e, "stage dump failed");
                self.failed += 1;
            }
        }
    }
}

impl StageObserver for StageDumper<'_> {
    fn raster(&mut self, stage: SegmentStage, raster: &Raster) {
        self.dump(stage, raster);
    }

    fn mask(&mut self, stage: SegmentStage, mask: &Mask) {
        self.dump(stage, &mask.to_raster());
    }
}
