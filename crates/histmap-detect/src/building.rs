//! Per-year building positions

use histmap_core::PixelPos;

/// One building's pixel positions on one map year
///
/// The first position is the primary one derived from the building
/// coordinates; the rest are its entrances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingPositions {
    pub id: String,
    positions: Vec<PixelPos>,
}

impl BuildingPositions {
    /// Building with a primary position and no entries.
    pub fn new(id: impl Into<String>, primary: PixelPos) -> Self {
        Self {
            id: id.into(),
            positions: vec![primary],
        }
    }

    /// Building from a position list as stored, primary first.
    ///
    /// An empty list is accepted here and rejected at detection time.
    pub fn from_positions(id: impl Into<String>, positions: Vec<PixelPos>) -> Self {
        Self {
            id: id.into(),
            positions,
        }
    }

    /// Add entry positions after the existing ones.
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = PixelPos>) -> Self {
        self.positions.extend(entries);
        self
    }

    pub fn primary(&self) -> Option<PixelPos> {
        self.positions.first().copied()
    }

    /// Entry positions, possibly empty.
    pub fn entries(&self) -> &[PixelPos] {
        self.positions.get(1..).unwrap_or(&[])
    }

    /// Every position, primary first.
    pub fn positions(&self) -> &[PixelPos] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_entries() {
        let b = BuildingPositions::new("190", PixelPos::new(1, 2))
            .with_entries([PixelPos::new(3, 4), PixelPos::new(5, 6)]);
        assert_eq!(b.primary(), Some(PixelPos::new(1, 2)));
        assert_eq!(b.entries().len(), 2);
        let empty = BuildingPositions::from_positions("7", vec![]);
        assert_eq!(empty.primary(), None);
        assert!(empty.entries().is_empty());
    }
}
