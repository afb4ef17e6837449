//! Item schema catalog loader.

use std::path::Path;

use anyhow::Context;
use inventory_core::ItemSchemaEntry;
use serde::{Deserialize, Serialize};

use crate::catalog::SchemaCatalog;
use crate::loaders::{LoadResult, read_file};

/// Item schema file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaCatalogFile {
    pub items: Vec<ItemSchemaEntry>,
}

/// Loader for item schema entries from RON files.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Load schema entries from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a `SchemaCatalogFile`
    pub fn load(path: &Path) -> LoadResult<Vec<ItemSchemaEntry>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse schema entries from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemSchemaEntry>> {
        let file: SchemaCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item schema RON: {}", e))?;

        tracing::debug!(entries = file.items.len(), "parsed item schema");
        Ok(file.items)
    }

    /// Load and validate a catalog in one step.
    pub fn load_catalog(path: &Path) -> LoadResult<SchemaCatalog> {
        let entries = Self::load(path)?;
        SchemaCatalog::new(entries).with_context(|| format!("invalid schema {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use inventory_core::{Capabilities, DefinitionId, ItemCategory};

    use super::*;

    #[test]
    fn capabilities_parse_from_flag_list() {
        let entries = SchemaLoader::parse(
            r#"(items: [
                (definition: 7, category: Skin, capabilities: "NAMEABLE | STICKERS", sticker_slots: 4),
                (definition: 8, category: Gloves),
            ])"#,
        )
        .unwrap();

        assert_eq!(entries[0].definition, DefinitionId(7));
        assert_eq!(entries[0].category, ItemCategory::Skin);
        assert_eq!(
            entries[0].capabilities,
            Capabilities::NAMEABLE | Capabilities::STICKERS
        );
        assert_eq!(entries[1].capabilities, Capabilities::empty());
    }
}
