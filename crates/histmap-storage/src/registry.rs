//! Building registry import
//!
//! The registry comes as two delimiter-separated tables with a header
//! row. Columns are located by name, so their order does not matter:
//!
//! - buildings: `EGID`, `GKODE`, `GKODN`, and optionally `GBAUJ`
//! - entrances: `EGID`, `DKODE`, `DKODN`

use crate::error::{StorageError, StorageResult};
use std::collections::HashMap;
use std::io::BufRead;

/// Building identifier column.
pub const COL_ID: &str = "EGID";
/// Building easting column.
pub const COL_EASTING: &str = "GKODE";
/// Building northing column.
pub const COL_NORTHING: &str = "GKODN";
/// Registry construction year column.
pub const COL_YEAR: &str = "GBAUJ";
/// Entrance easting column.
pub const COL_ENTRY_EASTING: &str = "DKODE";
/// Entrance northing column.
pub const COL_ENTRY_NORTHING: &str = "DKODN";

/// One registered building with metric coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryBuilding {
    pub id: String,
    pub easting: f64,
    pub northing: f64,
    /// Construction year declared by the registry, if any.
    pub reference_year: Option<i32>,
    /// Entrance coordinates `(easting, northing)`.
    pub entries: Vec<(f64, f64)>,
}

/// Registry buildings in table order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    buildings: Vec<RegistryBuilding>,
    index: HashMap<String, usize>,
}

struct Header {
    columns: Vec<String>,
}

impl Header {
    fn parse(line: &str, delimiter: char) -> Self {
        Self {
            columns: line.split(delimiter).map(|c| c.trim().to_string()).collect(),
        }
    }

    fn require(&self, name: &str) -> StorageResult<usize> {
        self.find(name)
            .ok_or_else(|| StorageError::MissingColumn(name.to_string()))
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Field `index` of a row, trimmed; missing trailing fields read empty.
fn cell<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).map_or("", |f| f.trim())
}

fn coordinate(line: usize, token: &str, name: &str) -> StorageResult<f64> {
    token.parse().map_err(|_| StorageError::RegistryFormat {
        line,
        reason: format!("invalid {name} '{token}'"),
    })
}

/// Lines of a table after its header. Errors if the table is empty.
fn read_table<R: BufRead>(reader: R, delimiter: char) -> StorageResult<(Header, Vec<String>)> {
    let mut lines = reader.lines();
    let head = lines.next().transpose()?.ok_or_else(|| StorageError::RegistryFormat {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let header = Header::parse(&head, delimiter);
    let rows = lines.collect::<Result<Vec<_>, _>>()?;
    Ok((header, rows))
}

impl Registry {
    /// Read the buildings table.
    ///
    /// Rows with an empty coordinate are skipped. An unreadable
    /// construction year is treated as unknown.
    ///
    /// # Errors
    ///
    /// [`StorageError::MissingColumn`] if a required column is absent,
    /// [`StorageError::RegistryFormat`] for a non-numeric coordinate.
    pub fn read_buildings<R: BufRead>(reader: R, delimiter: char) -> StorageResult<Self> {
        let (header, rows) = read_table(reader, delimiter)?;
        let id_col = header.require(COL_ID)?;
        let x_col = header.require(COL_EASTING)?;
        let y_col = header.require(COL_NORTHING)?;
        let year_col = header.find(COL_YEAR);

        let mut registry = Registry::default();
        for (i, row) in rows.iter().enumerate() {
            let line = i + 2;
            if row.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = row.split(delimiter).collect();
            let id = cell(&fields, id_col);
            let (x, y) = (cell(&fields, x_col), cell(&fields, y_col));
            if id.is_empty() || x.is_empty() || y.is_empty() {
                tracing::debug!(line, "registry row without identifier or coordinates");
                continue;
            }
            let reference_year = year_col.and_then(|c| {
                let token = cell(&fields, c);
                token.parse().ok().or_else(|| {
                    if !token.is_empty() {
                        tracing::debug!(line, token, "unreadable construction year");
                    }
                    None
                })
            });
            registry.push(RegistryBuilding {
                id: id.to_string(),
                easting: coordinate(line, x, COL_EASTING)?,
                northing: coordinate(line, y, COL_NORTHING)?,
                reference_year,
                entries: Vec::new(),
            });
        }
        Ok(registry)
    }

    /// Read the entrances table and attach entries to known buildings.
    ///
    /// Rows with empty coordinates or unknown identifiers are skipped.
    /// Returns the number of entries attached.
    pub fn read_entries<R: BufRead>(&mut self, reader: R, delimiter: char) -> StorageResult<usize> {
        let (header, rows) = read_table(reader, delimiter)?;
        let id_col = header.require(COL_ID)?;
        let x_col = header.require(COL_ENTRY_EASTING)?;
        let y_col = header.require(COL_ENTRY_NORTHING)?;

        let mut attached = 0;
        for (i, row) in rows.iter().enumerate() {
            let line = i + 2;
            let fields: Vec<&str> = row.split(delimiter).collect();
            let (x, y) = (cell(&fields, x_col), cell(&fields, y_col));
            if x.is_empty() || y.is_empty() {
                continue;
            }
            let Some(&slot) = self.index.get(cell(&fields, id_col)) else {
                continue;
            };
            let entry = (
                coordinate(line, x, COL_ENTRY_EASTING)?,
                coordinate(line, y, COL_ENTRY_NORTHING)?,
            );
            self.buildings[slot].entries.push(entry);
            attached += 1;
        }
        Ok(attached)
    }

    /// Add a building; a repeated identifier replaces the earlier row.
    pub fn push(&mut self, building: RegistryBuilding) {
        match self.index.get(&building.id) {
            Some(&slot) => self.buildings[slot] = building,
            None => {
                self.index.insert(building.id.clone(), self.buildings.len());
                self.buildings.push(building);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&RegistryBuilding> {
        self.index.get(id).map(|&slot| &self.buildings[slot])
    }

    pub fn buildings(&self) -> &[RegistryBuilding] {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
