//! Per-year detection
//!
//! For every building, the offset pattern is searched around its
//! primary position (and, when enabled, around each entry). The first
//! foreground candidate becomes the recorded position and its connected
//! footprint is measured with an erasing flood fill, so the visitation
//! plane is clean again before the next building.

use crate::building::BuildingPositions;
use crate::config::DetectConfig;
use crate::error::{DetectError, DetectResult};
use crate::overlay::TrackingOverlay;
use histmap_core::{DetectionRecord, Mask, PixelPos, VisitMask};
use histmap_region::component_area;

/// Detection outcome of one building on one map year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingDetection {
    pub id: String,
    pub record: DetectionRecord,
}

fn record_area(area: usize, id: &str, year: i32) -> DetectResult<u32> {
    u32::try_from(area).map_err(|_| DetectError::AreaOverflow {
        id: id.to_string(),
        year,
        area,
    })
}

/// Configured detection engine
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Create a detector, validating the configuration.
    pub fn new(config: DetectConfig) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Detect one building on a north-up segmented mask.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::MissingPosition`] if the building carries
    /// no position at all.
    pub fn detect_building(
        &self,
        mask: &Mask,
        visit: &mut VisitMask,
        building: &BuildingPositions,
        year: i32,
    ) -> DetectResult<DetectionRecord> {
        let nominal = building.primary().ok_or_else(|| DetectError::MissingPosition {
            id: building.id.clone(),
            year,
        })?;

        let searched: &[PixelPos] = if self.config.use_entries {
            building.positions()
        } else {
            &building.positions()[..1]
        };
        let found = searched
            .iter()
            .find_map(|&center| self.config.pattern.locate(mask, center));

        match found {
            Some(p) => {
                let area = component_area(mask, visit, p.x, p.y)?;
                let area = record_area(area, &building.id, year)?;
                Ok(DetectionRecord::present(year, p.into(), area))
            }
            None => Ok(DetectionRecord::absent(year, nominal)),
        }
    }

    /// Detect every building on one year's mask with a private
    /// visitation plane.
    pub fn detect_year(
        &self,
        mask: &Mask,
        buildings: &[BuildingPositions],
        year: i32,
        overlay: Option<&mut TrackingOverlay>,
    ) -> DetectResult<Vec<BuildingDetection>> {
        let mut visit = VisitMask::for_mask(mask);
        self.detect_year_with(mask, &mut visit, buildings, year, overlay)
    }

    /// Detect every building on one year's mask.
    ///
    /// `visit` must match the mask and be unvisited; it is left unvisited
    /// on return. Each record is drawn on `overlay` when one is given.
    ///
    /// # Errors
    ///
    /// Fails as a whole on the first building without a position, or if
    /// `visit` or `overlay` differ in size from `mask`.
    pub fn detect_year_with(
        &self,
        mask: &Mask,
        visit: &mut VisitMask,
        buildings: &[BuildingPositions],
        year: i32,
        mut overlay: Option<&mut TrackingOverlay>,
    ) -> DetectResult<Vec<BuildingDetection>> {
        if visit.size() != mask.size() {
            return Err(DetectError::DimensionMismatch {
                mask: mask.size(),
                other: visit.size(),
            });
        }
        if let Some(overlay) = overlay.as_deref() {
            overlay.check_mask(mask)?;
        }

        let mut detections = Vec::with_capacity(buildings.len());
        let mut found = 0usize;
        for building in buildings {
            let record = self.detect_building(mask, visit, building, year)?;
            if record.present {
                found += 1;
            }
            if let Some(overlay) = overlay.as_deref_mut() {
                overlay.mark(record.position, record.present, self.config.marker_half_size);
            }
            detections.push(BuildingDetection {
                id: building.id.clone(),
                record,
            });
        }

        tracing::info!(year, found, total = buildings.len(), "detection pass finished");
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::OffsetPattern;

    fn block_mask() -> Mask {
        // 3x2 block at x 4..7, y 4..6
        let mut mask = Mask::new(10, 10).unwrap();
        for y in 4..6 {
            for x in 4..7 {
                mask.set(x, y, true).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_found_records_matched_pixel_and_area() {
        let detector = Detector::new(DetectConfig::default()).unwrap();
        let mask = block_mask();
        let mut visit = VisitMask::for_mask(&mask);
        let b = BuildingPositions::new("1", PixelPos::new(2, 4));
        let r = detector.detect_building(&mask, &mut visit, &b, 1950).unwrap();
        assert!(r.present);
        assert_eq!(r.position, PixelPos::new(4, 4));
        assert_eq!(r.area, 6);
        assert_eq!(visit.count_visited(), 0);
    }

    #[test]
    fn test_missing_records_nominal() {
        let detector = Detector::new(DetectConfig::default()).unwrap();
        let mask = block_mask();
        let mut visit = VisitMask::for_mask(&mask);
        let b = BuildingPositions::new("2", PixelPos::new(0, 9));
        let r = detector.detect_building(&mask, &mut visit, &b, 1950).unwrap();
        assert_eq!(r, DetectionRecord::absent(1950, PixelPos::new(0, 9)));
    }

    #[test]
    fn test_missing_position_is_error() {
        let detector = Detector::new(DetectConfig::default()).unwrap();
        let b = BuildingPositions::from_positions("3", vec![]);
        let err = detector.detect_year(&block_mask(), &[b], 1950, None);
        assert!(matches!(err, Err(DetectError::MissingPosition { year: 1950, .. })));
    }

    #[test]
    fn test_entries_only_when_enabled() {
        let mask = block_mask();
        let b = BuildingPositions::new("4", PixelPos::new(0, 0)).with_entries([PixelPos::new(6, 7)]);
        let cfg = DetectConfig {
            pattern: OffsetPattern::new(vec![(0, 0), (0, -1), (0, -2)]).unwrap(),
            ..Default::default()
        };
        let off = Detector::new(cfg.clone()).unwrap();
        let on = Detector::new(DetectConfig {
            use_entries: true,
            ..cfg
        })
        .unwrap();
        let mut visit = VisitMask::for_mask(&mask);
        assert!(!off.detect_building(&mask, &mut visit, &b, 1).unwrap().present);
        let r = on.detect_building(&mask, &mut visit, &b, 1).unwrap();
        assert!(r.present);
        assert_eq!(r.position, PixelPos::new(6, 5));
    }

    #[test]
    fn test_record_area_range() {
        assert_eq!(record_area(36, "5", 1950).unwrap(), 36);
        assert_eq!(record_area(u32::MAX as usize, "5", 1950).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_record_area_overflow() {
        let err = record_area(u32::MAX as usize + 1, "5", 1950);
        assert!(matches!(
            err,
            Err(DetectError::AreaOverflow { year: 1950, area, .. }) if area == 1 << 32
        ));
    }

    #[test]
    fn test_visit_size_checked() {
        let detector = Detector::new(DetectConfig::default()).unwrap();
        let mut visit = VisitMask::new(3, 3).unwrap();
        let err = detector.detect_year_with(&block_mask(), &mut visit, &[], 1, None);
        assert!(matches!(err, Err(DetectError::DimensionMismatch { .. })));
    }
}
