//! Tool application: requests, rejections, and the state machine.
//!
//! A [`UseToolRequest`] is built entirely by the caller and only lives for
//! the call that processes it. [`ToolUser`] turns it into exactly one
//! [`crate::Response`] or a [`ToolRejection`]; rejections never mutate state.
//! The [`ToolOutcome`] of an accepted request also lists the items it
//! consumed, so the owner can drop any references it holds to them.
mod error;
mod user;

pub use error::ToolRejection;
pub use user::{ToolOutcome, ToolUser};

use crate::item::ItemId;

/// What the caller wants done with the tool/destination pair.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ToolAction {
    /// Consume the tool on the destination (or activate it on its own).
    Use,
    /// Scrape an applied sticker (or peel a patch) without consuming a tool.
    WearSticker,
    /// Clear a destination's display-name override.
    RemoveNameTag,
}

/// Sticker wear, scale, and rotation chosen when applying a sticker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickerPlacement {
    pub wear: f32,
    pub scale: f32,
    pub rotation: f32,
}

impl StickerPlacement {
    pub fn new(wear: f32, scale: f32, rotation: f32) -> Self {
        Self {
            wear,
            scale,
            rotation,
        }
    }

    /// Wear must lie in [0, 1), scale must be positive, all values finite.
    pub fn is_valid(&self) -> bool {
        (0.0..1.0).contains(&self.wear)
            && self.scale.is_finite()
            && self.scale > 0.0
            && self.rotation.is_finite()
    }
}

impl Default for StickerPlacement {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
}

/// Input record for [`crate::InventorySimulator::use_tool`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseToolRequest {
    pub action: ToolAction,
    pub tool: Option<ItemId>,
    pub destination: Option<ItemId>,
    /// Primary and secondary item of a stat-trak transfer.
    pub stat_trak_swap: Option<(ItemId, ItemId)>,
    pub sticker_slot: u8,
    pub placement: StickerPlacement,
    pub name_tag: String,
}

impl UseToolRequest {
    fn new(action: ToolAction) -> Self {
        Self {
            action,
            tool: None,
            destination: None,
            stat_trak_swap: None,
            sticker_slot: 0,
            placement: StickerPlacement::default(),
            name_tag: String::new(),
        }
    }

    /// Uses `tool`; chain [`Self::on`] for tools that need a destination.
    pub fn use_tool(tool: ItemId) -> Self {
        Self {
            tool: Some(tool),
            ..Self::new(ToolAction::Use)
        }
    }

    /// Opens a container that needs no key.
    pub fn open(container: ItemId) -> Self {
        Self {
            destination: Some(container),
            ..Self::new(ToolAction::Use)
        }
    }

    pub fn wear_sticker(destination: ItemId, slot: u8) -> Self {
        Self {
            destination: Some(destination),
            sticker_slot: slot,
            ..Self::new(ToolAction::WearSticker)
        }
    }

    pub fn remove_name_tag(destination: ItemId) -> Self {
        Self {
            destination: Some(destination),
            ..Self::new(ToolAction::RemoveNameTag)
        }
    }

    pub fn on(mut self, destination: ItemId) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn slot(mut self, slot: u8) -> Self {
        self.sticker_slot = slot;
        self
    }

    pub fn placement(mut self, placement: StickerPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name_tag = name.into();
        self
    }

    /// Sets the two items of a stat-trak transfer; `primary` receives the result.
    pub fn swap(mut self, primary: ItemId, secondary: ItemId) -> Self {
        self.stat_trak_swap = Some((primary, secondary));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_action_specific_fields() {
        let request = UseToolRequest::use_tool(ItemId(1))
            .on(ItemId(2))
            .slot(3)
            .name("AWP Lego");

        assert_eq!(request.action, ToolAction::Use);
        assert_eq!(request.tool, Some(ItemId(1)));
        assert_eq!(request.destination, Some(ItemId(2)));
        assert_eq!(request.sticker_slot, 3);
        assert_eq!(request.name_tag, "AWP Lego");
        assert_eq!(request.stat_trak_swap, None);
    }

    #[test]
    fn placement_validation() {
        assert!(StickerPlacement::default().is_valid());
        assert!(!StickerPlacement::new(1.0, 1.0, 0.0).is_valid());
        assert!(!StickerPlacement::new(0.5, 0.0, 0.0).is_valid());
        assert!(!StickerPlacement::new(0.5, 1.0, f32::NAN).is_valid());
    }
}
