//! histmap-storage - Storage tree and registry import
//!
//! Everything the pipeline stages exchange goes through files under one
//! storage root:
//!
//! - [`RasterDescriptor`] list - extent and pixel size of every map year
//! - [`Registry`] - buildings and entrances read from the registry tables
//! - [`link_positions`] - registry coordinates projected on every year
//! - [`Storage`] - paths, frames, histories, and results on disk

pub mod descriptor;
pub mod error;
pub mod link;
pub mod registry;
pub mod store;

pub use descriptor::{RasterDescriptor, format_descriptors, parse_descriptors};
pub use error::{StorageError, StorageResult};
pub use link::{LinkedBuilding, MapPosition, YearPositions, link_positions};
pub use registry::{Registry, RegistryBuilding};
pub use store::Storage;
