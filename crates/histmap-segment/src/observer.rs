//! Stage observation
//!
//! The segmenter reports every intermediate result to a
//! [`StageObserver`]. Observers only look; nothing they do feeds back
//! into the pipeline.

use histmap_core::{Mask, Raster};
use std::fmt;

/// Pipeline stage an intermediate result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentStage {
    /// Raster as loaded
    Source,
    /// Raster after contrast normalization
    Normalized,
    /// Dark-and-achromatic classification
    Classified,
    /// Mask after the given erosion pass (1-based)
    Erosion(u32),
    /// Components above the size threshold
    Components,
    /// Components kept by the shape filter
    ShapeFiltered,
    /// Final regrown mask
    Regrown,
}

impl fmt::Display for SegmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentStage::Source => write!(f, "source"),
            SegmentStage::Normalized => write!(f, "normalized"),
            SegmentStage::Classified => write!(f, "classified"),
            SegmentStage::Erosion(pass) => write!(f, "erosion-{pass}"),
            SegmentStage::Components => write!(f, "components"),
            SegmentStage::ShapeFiltered => write!(f, "shape-filtered"),
            SegmentStage::Regrown => write!(f, "regrown"),
        }
    }
}

/// Receiver of intermediate segmentation results
pub trait StageObserver {
    /// Called with raster stages ([`SegmentStage::Source`], [`SegmentStage::Normalized`]).
    fn raster(&mut self, _stage: SegmentStage, _raster: &Raster) {}

    /// Called with every mask stage.
    fn mask(&mut self, stage: SegmentStage, mask: &Mask);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn mask(&mut self, _stage: SegmentStage, _mask: &Mask) {}
}

/// Observer that keeps the foreground count of each mask stage
#[derive(Debug, Clone, Default)]
pub struct StageCounts {
    pub counts: Vec<(SegmentStage, usize)>,
}

impl StageObserver for StageCounts {
    fn mask(&mut self, stage: SegmentStage, mask: &Mask) {
        self.counts.push((stage, mask.count_foreground()));
    }
}
