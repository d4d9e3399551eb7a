//! Storage tree
//!
//! Every intermediate result lives in a file of its own under one root
//! directory:
//!
//! ```text
//! storage_list                      descriptor list
//! frames/raw/<year>.(tif|png)       raw maps
//! frames/segmented/<year>.tif       segmentation output
//! output/buildings/<id>             one empty marker per linked building
//! output/positions/<year>/<id>      primary position, then entries
//! output/reference/<id>             registry construction year
//! output/detect/<id>                detection history
//! output/deduce/<id>                deduced interval
//! output/overlay/<year>.png         tracking overlay
//! output/stages/<year>/stageN.png   segmentation stage dumps
//! ```

use crate::descriptor::{RasterDescriptor, format_descriptors, parse_descriptors};
use crate::error::{StorageError, StorageResult};
use crate::link::{LinkedBuilding, parse_positions};
use histmap_core::{
    DEFAULT_CUTOFF, DeductionResult, DetectionRecord, Mask, PixelPos, Raster, parse_history,
};
use histmap_io::RasterFormat;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DESCRIPTOR_FILE: &str = "storage_list";
const RAW_EXTENSIONS: [&str; 3] = ["tif", "tiff", "png"];

/// Read a text file, `None` if it does not exist.
fn read_optional(path: &Path) -> StorageResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether `dir` exists and holds at least one entry.
fn is_populated(dir: &Path) -> StorageResult<bool> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Whether `id` can name a file inside the tree.
fn is_plain_name(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

/// File-per-entity storage rooted at one directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create the directory skeleton under `root` (idempotent).
    pub fn create<P: AsRef<Path>>(root: P) -> StorageResult<Self> {
        let storage = Self {
            root: root.as_ref().to_path_buf(),
        };
        for dir in [
            storage.root.join("frames/raw"),
            storage.root.join("frames/segmented"),
            storage.output("buildings"),
            storage.output("positions"),
            storage.output("reference"),
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(storage)
    }

    /// Open an existing tree.
    ///
    /// # Errors
    ///
    /// Returns an I/O `NotFound` error if `root` is not a directory.
    pub fn open<P: AsRef<Path>>(root: P) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("storage root {} is not a directory", root.display()),
            )
            .into());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn output(&self, sub: &str) -> PathBuf {
        self.root.join("output").join(sub)
    }

    // --- Paths

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    /// Raw map of `year`, whichever supported extension exists.
    pub fn raw_frame_path(&self, year: i32) -> Option<PathBuf> {
        RAW_EXTENSIONS
            .iter()
            .map(|ext| self.root.join("frames/raw").join(format!("{year}.{ext}")))
            .find(|p| p.is_file())
    }

    pub fn segmented_frame_path(&self, year: i32) -> PathBuf {
        self.root
            .join("frames/segmented")
            .join(format!("{year}.{}", RasterFormat::Tiff.extension()))
    }

    pub fn positions_path(&self, year: i32, id: &str) -> PathBuf {
        self.output("positions").join(year.to_string()).join(id)
    }

    pub fn detect_dir(&self) -> PathBuf {
        self.output("detect")
    }

    pub fn deduce_dir(&self) -> PathBuf {
        self.output("deduce")
    }

    pub fn overlay_path(&self, year: i32) -> PathBuf {
        self.output("overlay").join(format!("{year}.png"))
    }

    pub fn stage_path(&self, year: i32, index: usize) -> PathBuf {
        self.output("stages")
            .join(year.to_string())
            .join(format!("stage{index}.png"))
    }

    // --- Descriptors

    pub fn read_descriptors(&self) -> StorageResult<Vec<RasterDescriptor>> {
        parse_descriptors(&fs::read_to_string(self.descriptor_path())?)
    }

    pub fn write_descriptors(&self, list: &[RasterDescriptor]) -> StorageResult<()> {
        fs::write(self.descriptor_path(), format_descriptors(list))?;
        Ok(())
    }

    // --- Linked buildings

    /// Write markers, per-year positions, and reference years.
    ///
    /// Identifiers that cannot name a file are skipped with a warning.
    /// Returns the number of buildings written.
    pub fn write_links(&self, links: &[LinkedBuilding]) -> StorageResult<usize> {
        let mut written = 0;
        for building in links {
            if !is_plain_name(&building.id) {
                tracing::warn!(id = %building.id, "identifier unusable as file name, skipped");
                continue;
            }
            fs::write(self.output("buildings").join(&building.id), b"")?;
            for year in &building.positions {
                let path = self.positions_path(year.year, &building.id);
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir)?;
                }
                let mut text = format!("{}\n", year.primary);
                for entry in &year.entries {
                    text.push_str(&format!("{entry}\n"));
                }
                fs::write(path, text)?;
            }
            if let Some(reference) = building.reference_year {
                fs::write(
                    self.output("reference").join(&building.id),
                    format!("{reference}\n"),
                )?;
            }
            written += 1;
        }
        Ok(written)
    }

    /// Identifiers of every linked building, sorted.
    pub fn building_ids(&self) -> StorageResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(self.output("buildings"))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(id) => ids.push(id),
                Err(name) => {
                    tracing::warn!(?name, "building marker name is not UTF-8, skipped");
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Integer pixel positions of a building on `year`, primary first.
    ///
    /// # Errors
    ///
    /// [`StorageError::MissingPosition`] if no position file exists or it
    /// is empty.
    pub fn read_positions(&self, year: i32, id: &str) -> StorageResult<Vec<PixelPos>> {
        let path = self.positions_path(year, id);
        let missing = || StorageError::MissingPosition {
            id: id.to_string(),
            year,
        };
        let text = read_optional(&path)?.ok_or_else(missing)?;
        let positions = parse_positions(&path, &text)?;
        if positions.is_empty() {
            return Err(missing());
        }
        Ok(positions)
    }

    /// Registry construction year of a building, if recorded.
    pub fn read_reference(&self, id: &str) -> StorageResult<Option<i32>> {
        let path = self.output("reference").join(id);
        let Some(text) = read_optional(&path)? else {
            return Ok(None);
        };
        let token = text.trim();
        token
            .parse()
            .map(Some)
            .map_err(|_| StorageError::PositionFormat {
                path,
                reason: format!("invalid year '{token}'"),
            })
    }

    // --- Frames

    pub fn read_raw_frame(&self, year: i32) -> StorageResult<Raster> {
        let path = self
            .raw_frame_path(year)
            .ok_or(StorageError::MissingFrame { kind: "raw", year })?;
        Ok(histmap_io::read_raster(path)?)
    }

    /// Store a segmented mask, rendered black on white.
    pub fn write_segmented(&self, year: i32, mask: &Mask) -> StorageResult<()> {
        let path = self.segmented_frame_path(year);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        histmap_io::write_raster(&mask.to_raster(), path, RasterFormat::Tiff)?;
        Ok(())
    }

    /// Load a segmented mask in file orientation.
    pub fn read_segmented(&self, year: i32) -> StorageResult<Mask> {
        let path = self.segmented_frame_path(year);
        if !path.is_file() {
            return Err(StorageError::MissingFrame {
                kind: "segmented",
                year,
            });
        }
        let raster = histmap_io::read_gray(path)?;
        Ok(Mask::from_raster(&raster, DEFAULT_CUTOFF))
    }

    pub fn write_overlay(&self, year: i32, overlay: &Raster) -> StorageResult<()> {
        self.write_png(&self.overlay_path(year), overlay)
    }

    pub fn write_stage(&self, year: i32, index: usize, raster: &Raster) -> StorageResult<()> {
        self.write_png(&self.stage_path(year, index), raster)
    }

    fn write_png(&self, path: &Path, raster: &Raster) -> StorageResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        histmap_io::write_raster(raster, path, RasterFormat::Png)?;
        Ok(())
    }

    // --- Detection histories

    /// Make the detect directory ready for a new pass.
    ///
    /// # Errors
    ///
    /// [`StorageError::AlreadyProcessed`] if it already holds histories
    /// and `reset` is false. With `reset`, previous histories and
    /// overlays are removed first.
    pub fn prepare_detection(&self, reset: bool) -> StorageResult<()> {
        self.prepare_output(&self.detect_dir(), reset)?;
        if reset {
            let overlays = self.output("overlay");
            if overlays.is_dir() {
                fs::remove_dir_all(&overlays)?;
            }
        }
        Ok(())
    }

    /// Append records to a building's history.
    ///
    /// Earlier lines are never rewritten.
    pub fn append_history(&self, id: &str, records: &[DetectionRecord]) -> StorageResult<()> {
        let dir = self.detect_dir();
        fs::create_dir_all(&dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(id))?;
        let mut text = String::new();
        for record in records {
            text.push_str(&format!("{record}\n"));
        }
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    /// A building's history in append order; empty if none was written.
    pub fn read_history(&self, id: &str) -> StorageResult<Vec<DetectionRecord>> {
        match read_optional(&self.detect_dir().join(id))? {
            Some(text) => Ok(parse_history(&text)?),
            None => Ok(Vec::new()),
        }
    }

    // --- Deduction results

    /// Make the deduce directory ready for a new pass, as
    /// [`prepare_detection`](Self::prepare_detection) does.
    pub fn prepare_deduction(&self, reset: bool) -> StorageResult<()> {
        self.prepare_output(&self.deduce_dir(), reset)
    }

    pub fn write_deduction(&self, id: &str, result: &DeductionResult) -> StorageResult<()> {
        let dir = self.deduce_dir();
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(id), format!("{result}\n"))?;
        Ok(())
    }

    pub fn read_deduction(&self, id: &str) -> StorageResult<Option<DeductionResult>> {
        match read_optional(&self.deduce_dir().join(id))? {
            Some(text) => Ok(Some(text.trim().parse()?)),
            None => Ok(None),
        }
    }

    fn prepare_output(&self, dir: &Path, reset: bool) -> StorageResult<()> {
        if is_populated(dir)? {
            if !reset {
                return Err(StorageError::AlreadyProcessed(dir.to_path_buf()));
            }
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }
}
