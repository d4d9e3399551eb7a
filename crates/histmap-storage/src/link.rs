//! Position linking
//!
//! Projects registry coordinates onto every map year. Only buildings
//! that land on every map are kept, so each kept building has exactly
//! one position per descriptor and its detection history covers the
//! whole timeline.

use crate::descriptor::RasterDescriptor;
use crate::error::{StorageError, StorageResult};
use crate::registry::Registry;
use histmap_core::PixelPos;
use std::fmt;
use std::str::FromStr;

/// Fractional pixel position as stored, three decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

impl MapPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Integer pixel, truncated toward zero.
    pub fn to_pixel(self) -> PixelPos {
        PixelPos::from_fractional(self.x, self.y)
    }
}

impl fmt::Display for MapPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} {:.3}", self.x, self.y)
    }
}

impl FromStr for MapPosition {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, String> {
        let mut tokens = line.split_whitespace();
        let (Some(x), Some(y), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(format!("expected 'x y', found '{line}'"));
        };
        let parse = |t: &str| {
            t.parse::<f64>()
                .map_err(|_| format!("invalid coordinate '{t}'"))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

/// Positions of one building on one map year
#[derive(Debug, Clone, PartialEq)]
pub struct YearPositions {
    pub year: i32,
    pub primary: MapPosition,
    pub entries: Vec<MapPosition>,
}

/// A building placed on every map year
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedBuilding {
    pub id: String,
    pub reference_year: Option<i32>,
    /// One element per descriptor, in descriptor order.
    pub positions: Vec<YearPositions>,
}

/// Project a metric coordinate on every descriptor.
///
/// Returns the positions when it lands on every map, and otherwise the
/// number of maps it did land on.
fn project(descriptors: &[RasterDescriptor], x: f64, y: f64) -> Result<Vec<MapPosition>, usize> {
    let positions: Vec<MapPosition> = descriptors
        .iter()
        .map(|d| d.metric_to_pixel(x, y))
        .zip(descriptors)
        .filter(|((u, v), d)| d.contains_pixel(*u, *v))
        .map(|((u, v), _)| MapPosition::new(u, v))
        .collect();
    if positions.len() == descriptors.len() {
        Ok(positions)
    } else {
        Err(positions.len())
    }
}

/// Link every registry building to every map year
///
/// A building appearing on some maps but not all is dropped with a
/// warning; a building on none is dropped silently. Entries that do
/// not land on every map are dropped one by one.
pub fn link_positions(descriptors: &[RasterDescriptor], registry: &Registry) -> Vec<LinkedBuilding> {
    let mut linked = Vec::new();
    for building in registry.buildings() {
        let primaries = match project(descriptors, building.easting, building.northing) {
            Ok(p) => p,
            Err(0) => continue,
            Err(hits) => {
                tracing::warn!(
                    id = %building.id,
                    hits,
                    maps = descriptors.len(),
                    "building partially appearing on the map timeline, rejected"
                );
                continue;
            }
        };

        let entries: Vec<Vec<MapPosition>> = building
            .entries
            .iter()
            .filter_map(|&(x, y)| project(descriptors, x, y).ok())
            .collect();

        let positions = descriptors
            .iter()
            .zip(primaries)
            .enumerate()
            .map(|(k, (d, primary))| YearPositions {
                year: d.year,
                primary,
                entries: entries.iter().map(|e| e[k]).collect(),
            })
            .collect();

        linked.push(LinkedBuilding {
            id: building.id.clone(),
            reference_year: building.reference_year,
            positions,
        });
    }
    tracing::info!(
        registered = registry.len(),
        linked = linked.len(),
        "registry linked to map timeline"
    );
    linked
}

/// Parse a position file: primary line, then entry lines.
pub(crate) fn parse_positions(path: &std::path::Path, text: &str) -> StorageResult<Vec<PixelPos>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            l.parse::<MapPosition>()
                .map(MapPosition::to_pixel)
                .map_err(|reason| StorageError::PositionFormat {
                    path: path.to_path_buf(),
                    reason,
                })
        })
        .collect()
}
