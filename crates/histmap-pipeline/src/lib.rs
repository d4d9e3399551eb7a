//! histmap-pipeline - Stage drivers
//!
//! Runs the stages over a [`Storage`](histmap_storage::Storage) tree:
//!
//! 1. [`bootstrap`] - link the registry onto the map timeline
//! 2. [`run_segmentation`] - raw maps to segmented masks
//! 3. [`run_detection`] - one record per building per year
//! 4. [`run_deduction`] - one interval per building
//! 5. [`run_evaluation`] - agreement with registry years
//!
//! Every stage isolates failures per unit of work (a year or a
//! building) and returns a [`StageReport`] naming what was skipped.

pub mod bootstrap;
pub mod config;
pub mod deduction;
pub mod detection;
pub mod dumper;
pub mod error;
pub mod report;
pub mod segmentation;

pub use bootstrap::bootstrap;
pub use config::PipelineConfig;
pub use deduction::{run_deduction, run_evaluation};
pub use detection::run_detection;
pub use dumper::StageDumper;
pub use error::{PipelineError, PipelineResult};
pub use report::StageReport;
pub use segmentation::run_segmentation;

use histmap_storage::RasterDescriptor;

/// Check a loaded raster against its descriptor.
pub(crate) fn check_size(descriptor: &RasterDescriptor, actual: (u32, u32)) -> PipelineResult<()> {
    if !descriptor.matches_size(actual.0, actual.1) {
        return Err(PipelineError::SizeMismatch {
            year: descriptor.year,
            expected: (descriptor.width, descriptor.height),
            actual,
        });
    }
    Ok(())
}
