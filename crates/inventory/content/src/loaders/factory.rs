//! Content factory for building core inputs from data files.

use std::path::{Path, PathBuf};

use inventory_core::{ItemSchemaEntry, SimulatorConfig};

use crate::catalog::SchemaCatalog;
use crate::loaders::{ConfigLoader, LoadResult, SchemaLoader};

/// Content factory that loads all inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load simulator configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<SimulatorConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load raw schema entries from `items.ron`.
    pub fn load_schema(&self) -> LoadResult<Vec<ItemSchemaEntry>> {
        SchemaLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load `items.ron` and validate it into a [`SchemaCatalog`].
    pub fn load_catalog(&self) -> LoadResult<SchemaCatalog> {
        SchemaLoader::load_catalog(&self.data_dir.join("items.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
