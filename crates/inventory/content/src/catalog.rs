//! Validated item schema exposed through [`StaticData`].

use inventory_core::{DefinitionId, ItemCategory, ItemSchemaEntry, SchemaTable, StaticData};

/// Reasons a set of schema entries cannot form a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaCatalogError {
    #[error("definition {0:?} appears more than once")]
    DuplicateDefinition(DefinitionId),

    #[error("definition {definition:?} is a {category} but carries a container schema")]
    ContainerOnNonCase {
        definition: DefinitionId,
        category: ItemCategory,
    },

    /// A container names a key that is missing or is not a key.
    #[error("container {container:?} requires key {key:?}, which is not a key definition")]
    UnknownKey {
        container: DefinitionId,
        key: DefinitionId,
    },

    #[error("container {container:?} drops {definition:?}, which is not in the catalog")]
    UnknownLoot {
        container: DefinitionId,
        definition: DefinitionId,
    },

    /// A loot prototype whose payload disagrees with its definition.
    #[error("container {container:?} drops {definition:?} as a {found}, but it is a {expected}")]
    LootCategoryMismatch {
        container: DefinitionId,
        definition: DefinitionId,
        expected: ItemCategory,
        found: ItemCategory,
    },
}

/// Item schema keyed by definition, validated on construction.
#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
    table: SchemaTable,
}

impl SchemaCatalog {
    /// Builds a catalog, rejecting duplicate definitions and containers whose
    /// key or loot cannot be resolved within the same catalog.
    pub fn new(entries: Vec<ItemSchemaEntry>) -> Result<Self, SchemaCatalogError> {
        let mut table = SchemaTable::new();
        for entry in entries {
            let definition = entry.definition;
            if table.insert(entry).is_some() {
                return Err(SchemaCatalogError::DuplicateDefinition(definition));
            }
        }

        for entry in table.entries() {
            validate_container(&table, entry)?;
        }

        Ok(Self { table })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Definitions of the given category, in no particular order.
    pub fn of_category(&self, category: ItemCategory) -> impl Iterator<Item = &ItemSchemaEntry> {
        self.table
            .entries()
            .filter(move |entry| entry.category == category)
    }

    pub fn into_table(self) -> SchemaTable {
        self.table
    }
}

fn validate_container(
    table: &SchemaTable,
    entry: &ItemSchemaEntry,
) -> Result<(), SchemaCatalogError> {
    let Some(container) = &entry.container else {
        return Ok(());
    };
    if entry.category != ItemCategory::Case {
        return Err(SchemaCatalogError::ContainerOnNonCase {
            definition: entry.definition,
            category: entry.category,
        });
    }
    if let Some(key) = container.key
        && table
            .lookup(key)
            .is_none_or(|key_entry| key_entry.category != ItemCategory::Key)
    {
        return Err(SchemaCatalogError::UnknownKey {
            container: entry.definition,
            key,
        });
    }

    for loot in &container.loot {
        let Some(dropped) = table.lookup(loot.definition) else {
            return Err(SchemaCatalogError::UnknownLoot {
                container: entry.definition,
                definition: loot.definition,
            });
        };
        if dropped.category != loot.item.category() {
            return Err(SchemaCatalogError::LootCategoryMismatch {
                container: entry.definition,
                definition: loot.definition,
                expected: dropped.category,
                found: loot.item.category(),
            });
        }
    }
    if container.total_weight() == 0 {
        tracing::warn!(definition = ?entry.definition, "container has no loot");
    }
    Ok(())
}

impl StaticData for SchemaCatalog {
    fn lookup(&self, definition: DefinitionId) -> Option<&ItemSchemaEntry> {
        self.table.lookup(definition)
    }
}

#[cfg(test)]
mod tests {
    use inventory_core::{ContainerSchema, ItemData, LootEntry};

    use super::*;

    fn coin() -> ItemSchemaEntry {
        ItemSchemaEntry::builder(DefinitionId(1), ItemCategory::Collectible).build()
    }

    fn case(key: Option<DefinitionId>) -> ItemSchemaEntry {
        ItemSchemaEntry::builder(DefinitionId(10), ItemCategory::Case)
            .container(ContainerSchema {
                key,
                loot: vec![LootEntry::new(DefinitionId(1), ItemData::Collectible, 1)],
                stat_trak_chance: 0,
            })
            .build()
    }

    #[test]
    fn rejects_duplicates() {
        let entry = ItemSchemaEntry::builder(DefinitionId(1), ItemCategory::Sticker).build();
        let err = SchemaCatalog::new(vec![entry.clone(), entry]).unwrap_err();
        assert_eq!(err, SchemaCatalogError::DuplicateDefinition(DefinitionId(1)));
    }

    #[test]
    fn container_key_must_be_a_key() {
        let sticker = ItemSchemaEntry::builder(DefinitionId(11), ItemCategory::Sticker).build();
        let err = SchemaCatalog::new(vec![case(Some(DefinitionId(11))), sticker]).unwrap_err();
        assert_eq!(
            err,
            SchemaCatalogError::UnknownKey {
                container: DefinitionId(10),
                key: DefinitionId(11)
            }
        );

        let key = ItemSchemaEntry::builder(DefinitionId(11), ItemCategory::Key).build();
        let catalog = SchemaCatalog::new(vec![case(Some(DefinitionId(11))), key, coin()]).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.lookup(DefinitionId(10)).unwrap().container.is_some());
        assert_eq!(catalog.of_category(ItemCategory::Key).count(), 1);
    }

    #[test]
    fn containers_belong_to_cases() {
        let mut entry = case(None);
        entry.category = ItemCategory::Collectible;
        assert_eq!(
            SchemaCatalog::new(vec![entry]).unwrap_err(),
            SchemaCatalogError::ContainerOnNonCase {
                definition: DefinitionId(10),
                category: ItemCategory::Collectible
            }
        );
    }

    #[test]
    fn loot_must_match_its_definition() {
        assert_eq!(
            SchemaCatalog::new(vec![case(None)]).unwrap_err(),
            SchemaCatalogError::UnknownLoot {
                container: DefinitionId(10),
                definition: DefinitionId(1)
            }
        );

        let sticker = ItemSchemaEntry::builder(DefinitionId(1), ItemCategory::Sticker).build();
        assert_eq!(
            SchemaCatalog::new(vec![case(None), sticker]).unwrap_err(),
            SchemaCatalogError::LootCategoryMismatch {
                container: DefinitionId(10),
                definition: DefinitionId(1),
                expected: ItemCategory::Sticker,
                found: ItemCategory::Collectible
            }
        );

        let table = SchemaCatalog::new(vec![case(None), coin()])
            .unwrap()
            .into_table();
        assert_eq!(table.len(), 2);
    }
}
