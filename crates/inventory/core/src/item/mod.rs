//! Item model.
//!
//! Items are a tagged union over categories ([`ItemData`]) plus the schema
//! definition they were created from. They carry no identity of their own:
//! external ids live in [`crate::state::IdentityIndex`].
mod data;

pub use data::{Agent, AppliedSticker, Gloves, ItemData, Music, Skin};

/// Reference to an item definition in the external schema (lookup via Env).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DefinitionId(pub u32);

/// Externally assigned 64-bit item identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u64);

/// Closed set of item categories the simulator understands.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    Skin,
    Gloves,
    Agent,
    Music,
    Sticker,
    Patch,
    Case,
    Key,
    NameTag,
    StatTrakSwapTool,
    OperationPass,
    ViewerPass,
    Collectible,
}

impl ItemCategory {
    /// Returns true for consumables that act on another item (or on themselves).
    pub const fn is_tool(&self) -> bool {
        matches!(
            self,
            Self::Sticker
                | Self::Patch
                | Self::Key
                | Self::NameTag
                | Self::StatTrakSwapTool
                | Self::OperationPass
                | Self::ViewerPass
        )
    }
}

/// The `gameItem` descriptor: which schema entry an item came from and its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameItem {
    pub definition: DefinitionId,
    pub category: ItemCategory,
}

/// An owned inventory item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub definition: DefinitionId,
    pub data: ItemData,
}

impl Item {
    pub fn new(definition: DefinitionId, data: ItemData) -> Self {
        Self { definition, data }
    }

    pub fn game_item(&self) -> GameItem {
        GameItem {
            definition: self.definition,
            category: self.category(),
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.data.category()
    }

    /// Current stat-trak counter, if the item tracks one.
    pub fn stat_trak(&self) -> Option<i32> {
        match &self.data {
            ItemData::Skin(skin) => skin.stat_trak,
            ItemData::Music(music) => music.stat_trak,
            _ => None,
        }
    }

    /// Mutable access to the stat-trak counter of items that track one.
    pub fn stat_trak_mut(&mut self) -> Option<&mut i32> {
        match &mut self.data {
            ItemData::Skin(skin) => skin.stat_trak.as_mut(),
            ItemData::Music(music) => music.stat_trak.as_mut(),
            _ => None,
        }
    }

    /// Display-name override, if any.
    pub fn name_tag(&self) -> Option<&str> {
        match &self.data {
            ItemData::Skin(skin) => skin.name_tag.as_deref(),
            _ => None,
        }
    }

    pub fn sticker(&self, slot: u8) -> Option<&AppliedSticker> {
        match &self.data {
            ItemData::Skin(skin) => skin.stickers.get(usize::from(slot))?.as_ref(),
            _ => None,
        }
    }

    pub fn patch(&self, slot: u8) -> Option<u32> {
        match &self.data {
            ItemData::Agent(agent) => agent.patches.get(usize::from(slot)).copied().flatten(),
            _ => None,
        }
    }

    /// Returns true if a pass item has been activated.
    pub fn is_activated(&self) -> bool {
        matches!(
            self.data,
            ItemData::OperationPass { activated: true } | ItemData::ViewerPass { activated: true }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn category_round_trips_through_snake_case() {
        assert_eq!(ItemCategory::StatTrakSwapTool.as_ref(), "stat_trak_swap_tool");
        assert_eq!(
            ItemCategory::from_str("viewer_pass"),
            Ok(ItemCategory::ViewerPass)
        );
    }

    #[test]
    fn tools_are_classified() {
        assert!(ItemCategory::Key.is_tool());
        assert!(ItemCategory::OperationPass.is_tool());
        assert!(!ItemCategory::Case.is_tool());
        assert!(!ItemCategory::Skin.is_tool());
    }

    #[test]
    fn stat_trak_only_on_counting_items() {
        let mut skin = Item::new(DefinitionId(7), ItemData::Skin(Skin::stat_trak(44, 12)));
        assert_eq!(skin.stat_trak(), Some(12));
        *skin.stat_trak_mut().unwrap() += 1;
        assert_eq!(skin.stat_trak(), Some(13));

        let gloves = Item::new(DefinitionId(5027), ItemData::Gloves(Gloves::default()));
        assert_eq!(gloves.stat_trak(), None);
    }
}
