//! Category-specific item payloads.

use crate::config::SimulatorConfig;

use super::ItemCategory;

/// Item payload with category-specific mutable fields.
///
/// # Design: Base + Kind Pattern
///
/// - [`super::Item`] holds the common field (schema definition)
/// - `ItemData` holds per-category state (wear, counters, applied stickers)
/// - Static properties (slot counts, loot tables) come from the schema instead
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemData {
    /// Weapon or knife finish.
    Skin(Skin),

    Gloves(Gloves),

    /// Character model that can carry patches.
    Agent(Agent),

    Music(Music),

    /// Unapplied sticker.
    Sticker { kit: u32 },

    /// Unapplied patch.
    Patch { patch: u32 },

    Case,

    Key,

    NameTag,

    StatTrakSwapTool,

    /// Operation pass; `activated` flips once.
    OperationPass { activated: bool },

    /// Tournament viewer pass; `activated` flips once.
    ViewerPass { activated: bool },

    /// Coins, pins and other display-only rewards.
    Collectible,
}

impl ItemData {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Skin(_) => ItemCategory::Skin,
            Self::Gloves(_) => ItemCategory::Gloves,
            Self::Agent(_) => ItemCategory::Agent,
            Self::Music(_) => ItemCategory::Music,
            Self::Sticker { .. } => ItemCategory::Sticker,
            Self::Patch { .. } => ItemCategory::Patch,
            Self::Case => ItemCategory::Case,
            Self::Key => ItemCategory::Key,
            Self::NameTag => ItemCategory::NameTag,
            Self::StatTrakSwapTool => ItemCategory::StatTrakSwapTool,
            Self::OperationPass { .. } => ItemCategory::OperationPass,
            Self::ViewerPass { .. } => ItemCategory::ViewerPass,
            Self::Collectible => ItemCategory::Collectible,
        }
    }
}

/// A sticker applied to a skin slot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedSticker {
    pub kit: u32,
    pub wear: f32,
    pub scale: f32,
    pub rotation: f32,
}

impl AppliedSticker {
    pub fn new(kit: u32) -> Self {
        Self {
            kit,
            wear: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Skin {
    pub paint_kit: u32,
    pub wear: f32,
    pub seed: i32,
    /// `Some` for stat-trak items.
    pub stat_trak: Option<i32>,
    /// Display-name override set by a name tag.
    pub name_tag: Option<String>,
    pub stickers: [Option<AppliedSticker>; SimulatorConfig::MAX_STICKER_SLOTS],
}

impl Skin {
    pub fn new(paint_kit: u32) -> Self {
        Self {
            paint_kit,
            ..Self::default()
        }
    }

    pub fn stat_trak(paint_kit: u32, counter: i32) -> Self {
        Self {
            paint_kit,
            stat_trak: Some(counter),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Gloves {
    pub paint_kit: u32,
    pub wear: f32,
    pub seed: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Agent {
    pub patches: [Option<u32>; SimulatorConfig::MAX_PATCH_SLOTS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Music {
    pub kit: u32,
    pub stat_trak: Option<i32>,
}
