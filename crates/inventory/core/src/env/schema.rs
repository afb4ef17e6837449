//! Read-only item schema consumed by the tool state machine.

use std::collections::HashMap;

use bitflags::bitflags;

use crate::item::{DefinitionId, ItemCategory, ItemData};

/// Read-only schema lookups (container contents, slot limits, eligibility).
///
/// The simulator never writes through this interface.
pub trait StaticData: Send + Sync {
    fn lookup(&self, definition: DefinitionId) -> Option<&ItemSchemaEntry>;
}

bitflags! {
    /// What a definition supports beyond its category.
    ///
    /// Serialized as a `|`-separated flag list, e.g. `"NAMEABLE | STICKERS"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Capabilities: u8 {
        /// Accepts a display-name override from a name tag.
        const NAMEABLE  = 1 << 0;
        /// Has sticker slots.
        const STICKERS  = 1 << 1;
        /// Has patch slots.
        const PATCHES   = 1 << 2;
        /// Can carry a stat-trak counter.
        const STAT_TRAK = 1 << 3;
    }
}

/// How a stat-trak transfer tool combines two counters into the primary item.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatTrakTransferRule {
    /// Primary receives both counters.
    #[default]
    Sum,
    /// Primary keeps the larger counter.
    Max,
}

impl StatTrakTransferRule {
    pub fn combine(&self, primary: i32, secondary: i32) -> i32 {
        match self {
            Self::Sum => primary.saturating_add(secondary),
            Self::Max => primary.max(secondary),
        }
    }
}

/// One weighted outcome of a container roll.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub definition: DefinitionId,
    /// Prototype of the dropped item; skins get wear and seed rolled on top.
    pub item: ItemData,
    pub weight: u32,
}

impl LootEntry {
    pub fn new(definition: DefinitionId, item: ItemData, weight: u32) -> Self {
        Self {
            definition,
            item,
            weight,
        }
    }
}

/// Container contents and opening requirements.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSchema {
    /// Key definition required to open; `None` for keyless containers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Option<DefinitionId>,
    pub loot: Vec<LootEntry>,
    /// Percent chance (0-100) that a dropped skin or music kit is stat-trak.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_trak_chance: u8,
}

impl ContainerSchema {
    pub fn total_weight(&self) -> u64 {
        self.loot.iter().map(|entry| u64::from(entry.weight)).sum()
    }

    /// Picks the loot entry covering `roll` (taken modulo the total weight).
    pub fn pick(&self, roll: u64) -> Option<&LootEntry> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let mut remaining = roll % total;
        self.loot.iter().find(|entry| {
            let weight = u64::from(entry.weight);
            if remaining < weight {
                true
            } else {
                remaining -= weight;
                false
            }
        })
    }
}

/// Schema entry for one item definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSchemaEntry {
    pub definition: DefinitionId,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: Capabilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sticker_slots: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patch_slots: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub container: Option<ContainerSchema>,
    /// Item granted when a viewer pass of this definition is activated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pass_reward: Option<DefinitionId>,
    /// Combination rule for stat-trak transfer tools.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_trak_transfer: Option<StatTrakTransferRule>,
}

impl ItemSchemaEntry {
    pub fn builder(definition: DefinitionId, category: ItemCategory) -> ItemSchemaEntryBuilder {
        ItemSchemaEntryBuilder::new(definition, category)
    }

    pub fn is_nameable(&self) -> bool {
        self.capabilities.contains(Capabilities::NAMEABLE)
    }
}

/// Builder for constructing schema entries.
#[derive(Clone, Debug)]
pub struct ItemSchemaEntryBuilder {
    entry: ItemSchemaEntry,
}

impl ItemSchemaEntryBuilder {
    pub fn new(definition: DefinitionId, category: ItemCategory) -> Self {
        Self {
            entry: ItemSchemaEntry {
                definition,
                category,
                capabilities: Capabilities::empty(),
                sticker_slots: 0,
                patch_slots: 0,
                container: None,
                pass_reward: None,
                stat_trak_transfer: None,
            },
        }
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.entry.capabilities |= capabilities;
        self
    }

    /// Sets the sticker slot count and marks the definition sticker-capable.
    pub fn sticker_slots(mut self, slots: u8) -> Self {
        self.entry.sticker_slots = slots;
        self.entry.capabilities |= Capabilities::STICKERS;
        self
    }

    /// Sets the patch slot count and marks the definition patch-capable.
    pub fn patch_slots(mut self, slots: u8) -> Self {
        self.entry.patch_slots = slots;
        self.entry.capabilities |= Capabilities::PATCHES;
        self
    }

    pub fn container(mut self, container: ContainerSchema) -> Self {
        self.entry.container = Some(container);
        self
    }

    pub fn pass_reward(mut self, reward: DefinitionId) -> Self {
        self.entry.pass_reward = Some(reward);
        self
    }

    pub fn stat_trak_transfer(mut self, rule: StatTrakTransferRule) -> Self {
        self.entry.stat_trak_transfer = Some(rule);
        self
    }

    pub fn build(self) -> ItemSchemaEntry {
        self.entry
    }
}

/// [`StaticData`] backed by an in-memory map.
#[derive(Clone, Debug, Default)]
pub struct SchemaTable {
    entries: HashMap<DefinitionId, ItemSchemaEntry>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the one it replaced.
    pub fn insert(&mut self, entry: ItemSchemaEntry) -> Option<ItemSchemaEntry> {
        self.entries.insert(entry.definition, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ItemSchemaEntry> {
        self.entries.values()
    }
}

impl FromIterator<ItemSchemaEntry> for SchemaTable {
    fn from_iter<T: IntoIterator<Item = ItemSchemaEntry>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|entry| (entry.definition, entry))
                .collect(),
        }
    }
}

impl StaticData for SchemaTable {
    fn lookup(&self, definition: DefinitionId) -> Option<&ItemSchemaEntry> {
        self.entries.get(&definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerSchema {
        ContainerSchema {
            key: None,
            loot: vec![
                LootEntry::new(DefinitionId(1), ItemData::Collectible, 3),
                LootEntry::new(DefinitionId(2), ItemData::Collectible, 1),
            ],
            stat_trak_chance: 0,
        }
    }

    #[test]
    fn pick_respects_weights() {
        let container = container();
        assert_eq!(container.total_weight(), 4);
        assert_eq!(container.pick(0).unwrap().definition, DefinitionId(1));
        assert_eq!(container.pick(2).unwrap().definition, DefinitionId(1));
        assert_eq!(container.pick(3).unwrap().definition, DefinitionId(2));
        assert_eq!(container.pick(7).unwrap().definition, DefinitionId(2));
    }

    #[test]
    fn empty_loot_picks_nothing() {
        assert!(ContainerSchema::default().pick(0).is_none());
    }

    #[test]
    fn transfer_rules() {
        assert_eq!(StatTrakTransferRule::Sum.combine(10, 5), 15);
        assert_eq!(StatTrakTransferRule::Max.combine(10, 5), 10);
        assert_eq!(StatTrakTransferRule::Sum.combine(i32::MAX, 1), i32::MAX);
    }

    #[test]
    fn builder_sets_capabilities_from_slots() {
        let entry = ItemSchemaEntry::builder(DefinitionId(7), ItemCategory::Skin)
            .capabilities(Capabilities::NAMEABLE)
            .sticker_slots(4)
            .build();

        assert!(entry.is_nameable());
        assert!(entry.capabilities.contains(Capabilities::STICKERS));
        assert_eq!(entry.sticker_slots, 4);

        let table: SchemaTable = [entry.clone()].into_iter().collect();
        assert_eq!(table.lookup(DefinitionId(7)), Some(&entry));
        assert_eq!(table.lookup(DefinitionId(8)), None);
    }
}
