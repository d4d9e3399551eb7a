//! Storage bootstrap from registry tables

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use histmap_storage::{Registry, Storage, StorageError, link_positions};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn open(path: &Path) -> PipelineResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path).map_err(StorageError::from)?))
}

/// Link the registry onto the descriptor list already in `storage`.
///
/// Reads the buildings table and, when given, the entrances table,
/// projects every building on every map year and writes markers,
/// positions, and reference years. Returns the number of linked
/// buildings.
pub fn bootstrap(
    storage: &Storage,
    buildings: &Path,
    entrances: Option<&Path>,
    config: &PipelineConfig,
) -> PipelineResult<usize> {
    let descriptors = storage.read_descriptors()?;
    let mut registry = Registry::read_buildings(open(buildings)?, config.delimiter)?;
    if let Some(path) = entrances {
        let attached = registry.read_entries(open(path)?, config.delimiter)?;
        tracing::info!(attached, "entrances read");
    }
    let links = link_positions(&descriptors, &registry);
    let written = storage.write_links(&links)?;
    tracing::info!(
        registered = registry.len(),
        linked = written,
        years = descriptors.len(),
        "storage bootstrapped"
    );
    Ok(written)
}
