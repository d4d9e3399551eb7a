//! Segmentation driver
//!
//! Runs the stages in order:
//!
//! 1. optional contrast normalization
//! 2. dark-and-achromatic classification
//! 3. density erosion, iterated until stable
//! 4. connected components above the size threshold
//! 5. optional elongation filter
//! 6. regrowth inside the classification mask
//!
//! and reports each intermediate result to a [`StageObserver`].

use crate::classify::classify;
use crate::config::SegmentConfig;
use crate::erosion::erode_until_stable;
use crate::error::SegmentResult;
use crate::normalize::normalize;
use crate::observer::{NoopObserver, SegmentStage, StageObserver};
use crate::regrow::regrow;
use crate::shape::filter_components;
use histmap_core::{Mask, Raster, VisitMask};
use histmap_region::{Component, extract_components_with};

/// Statistics of one segmentation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentReport {
    /// Foreground cells after classification
    pub classified: usize,
    /// Foreground cells after erosion
    pub eroded: usize,
    /// Erosion passes that changed the mask
    pub erosion_passes: u32,
    /// Components at or above `min_component_pixels`
    pub components_found: usize,
    /// Components surviving the shape filter
    pub components_kept: usize,
    /// Foreground cells of the final mask
    pub regrown: usize,
}

/// Configured segmentation pipeline
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentConfig,
}

impl Segmenter {
    /// Create a segmenter, validating the configuration.
    pub fn new(config: SegmentConfig) -> SegmentResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Segment a raw map raster.
    pub fn run(&self, raster: &Raster) -> SegmentResult<(Mask, SegmentReport)> {
        self.run_observed(raster, &mut NoopObserver)
    }

    /// Segment a raw map raster, reporting every stage to `observer`.
    pub fn run_observed(
        &self,
        raster: &Raster,
        observer: &mut dyn StageObserver,
    ) -> SegmentResult<(Mask, SegmentReport)> {
        let cfg = &self.config;
        let _span = tracing::debug_span!("segment", width = raster.width(), height = raster.height())
            .entered();
        let mut report = SegmentReport::default();

        observer.raster(SegmentStage::Source, raster);
        let normalized;
        let source = match &cfg.normalize {
            Some(normalize_cfg) => {
                normalized = normalize(raster, normalize_cfg)?;
                observer.raster(SegmentStage::Normalized, &normalized);
                &normalized
            }
            None => raster,
        };

        let classified = classify(source, &cfg.classify);
        report.classified = classified.count_foreground();
        observer.mask(SegmentStage::Classified, &classified);

        let (eroded, passes) = erode_until_stable(&classified, &cfg.erosion, observer);
        report.eroded = eroded.count_foreground();
        report.erosion_passes = passes;

        let mut visit = VisitMask::for_mask(&eroded);
        let components = extract_components_with(&eroded, &mut visit, cfg.min_component_pixels)?;
        report.components_found = components.len();
        observer.mask(SegmentStage::Components, &paint(&eroded, &components));

        let components = match &cfg.shape_filter {
            Some(shape_cfg) => {
                let kept = filter_components(components, shape_cfg)?;
                observer.mask(SegmentStage::ShapeFiltered, &paint(&eroded, &kept));
                kept
            }
            None => components,
        };
        report.components_kept = components.len();

        let regrown = regrow(&components, &classified, cfg.regrow_tolerance);
        report.regrown = regrown.count_foreground();
        observer.mask(SegmentStage::Regrown, &regrown);

        tracing::debug!(
            classified = report.classified,
            eroded = report.eroded,
            passes = report.erosion_passes,
            found = report.components_found,
            kept = report.components_kept,
            regrown = report.regrown,
            "segmentation finished"
        );
        Ok((regrown, report))
    }
}

fn paint(like: &Mask, components: &[Component]) -> Mask {
    let mut out = Mask::new_like(like);
    for component in components {
        component.paint(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::StageCounts;
    use histmap_core::Channels;

    fn map_with_block() -> Raster {
        // white paper, one 6x6 dark gray building, one dark red patch
        let mut m = Raster::filled(16, 12, Channels::Rgb, 235).unwrap().to_mut();
        for y in 3..9 {
            for x in 2..8 {
                m.set_rgb(x, y, 30, 30, 35).unwrap();
            }
            for x in 11..15 {
                m.set_rgb(x, y, 80, 10, 10).unwrap();
            }
        }
        m.into()
    }

    #[test]
    fn test_block_recovered() {
        let segmenter = Segmenter::new(SegmentConfig::default()).unwrap();
        let (mask, report) = segmenter.run(&map_with_block()).unwrap();
        assert_eq!(report.classified, 36);
        assert_eq!(report.components_found, 1);
        assert_eq!(report.regrown, 36);
        assert!(mask.is_foreground(2, 3));
        assert!(!mask.is_foreground(12, 5));
    }

    #[test]
    fn test_observer_sees_stages() {
        let segmenter = Segmenter::new(SegmentConfig::default()).unwrap();
        let mut counts = StageCounts::default();
        segmenter.run_observed(&map_with_block(), &mut counts).unwrap();
        let stages: Vec<SegmentStage> = counts.counts.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages.first(), Some(&SegmentStage::Classified));
        assert_eq!(stages.last(), Some(&SegmentStage::Regrown));
        assert!(stages.contains(&SegmentStage::Erosion(1)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut cfg = SegmentConfig::default();
        cfg.min_component_pixels = 0;
        assert!(Segmenter::new(cfg).is_err());
    }
}
