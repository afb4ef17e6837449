//! Reasons a tool request produced no response.

use crate::error::{ErrorSeverity, SimulatorError};
use crate::item::{DefinitionId, ItemCategory, ItemId};

/// Why a tool request was dropped.
///
/// None of these are surfaced to callers; absence of a response is the
/// failure signal. They exist for classification and logging.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ToolRejection {
    /// No live item carries this id (never assigned, or removed meanwhile).
    #[error("item {0:?} is not in the inventory")]
    UnresolvedItem(ItemId),

    #[error("request names no tool")]
    MissingTool,

    #[error("request names no destination")]
    MissingDestination,

    /// The tool cannot be used on this destination.
    #[error("{tool} cannot be used on {destination}")]
    CategoryMismatch {
        tool: ItemCategory,
        destination: ItemCategory,
    },

    #[error("{0} is not a tool")]
    NotATool(ItemCategory),

    #[error("{0} has nothing to wear off")]
    NotWearable(ItemCategory),

    #[error("destination and tool refer to the same item {0:?}")]
    SameItem(ItemId),

    #[error("definition {0:?} is missing from the schema")]
    UnknownDefinition(DefinitionId),

    #[error("definition {0:?} has no container schema")]
    NotAContainer(DefinitionId),

    #[error("container {0:?} has no loot")]
    EmptyLootTable(DefinitionId),

    #[error("container needs key {expected:?}, got {found:?}")]
    WrongKey {
        expected: DefinitionId,
        found: Option<DefinitionId>,
    },

    #[error("slot {slot} is out of range ({available} available)")]
    SlotOutOfRange { slot: u8, available: u8 },

    #[error("slot {0} is already occupied")]
    SlotOccupied(u8),

    #[error("slot {0} is empty")]
    SlotEmpty(u8),

    #[error("sticker placement is out of range")]
    InvalidPlacement,

    #[error("name tag text is empty or too long")]
    InvalidName,

    #[error("item {0:?} has no name tag")]
    NoNameTag(ItemId),

    #[error("pass {0:?} is already active")]
    AlreadyActivated(ItemId),

    #[error("item {0:?} has no stat-trak counter")]
    NoStatTrak(ItemId),
}

impl SimulatorError for ToolRejection {
    fn severity(&self) -> ErrorSeverity {
        use ToolRejection::*;
        match self {
            // Requests may race against removals by the embedding application
            UnresolvedItem(_) => ErrorSeverity::Recoverable,

            // The schema cannot answer what the request depends on
            UnknownDefinition(_) | NotAContainer(_) | EmptyLootTable(_) => ErrorSeverity::Data,

            MissingTool
            | MissingDestination
            | CategoryMismatch { .. }
            | NotATool(_)
            | NotWearable(_)
            | SameItem(_)
            | WrongKey { .. }
            | SlotOutOfRange { .. }
            | SlotOccupied(_)
            | SlotEmpty(_)
            | InvalidPlacement
            | InvalidName
            | NoNameTag(_)
            | AlreadyActivated(_)
            | NoStatTrak(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ToolRejection::*;
        match self {
            UnresolvedItem(_) => "TOOL_UNRESOLVED_ITEM",
            MissingTool => "TOOL_MISSING_TOOL",
            MissingDestination => "TOOL_MISSING_DESTINATION",
            CategoryMismatch { .. } => "TOOL_CATEGORY_MISMATCH",
            NotATool(_) => "TOOL_NOT_A_TOOL",
            NotWearable(_) => "TOOL_NOT_WEARABLE",
            SameItem(_) => "TOOL_SAME_ITEM",
            UnknownDefinition(_) => "TOOL_UNKNOWN_DEFINITION",
            NotAContainer(_) => "TOOL_NOT_A_CONTAINER",
            EmptyLootTable(_) => "TOOL_EMPTY_LOOT_TABLE",
            WrongKey { .. } => "TOOL_WRONG_KEY",
            SlotOutOfRange { .. } => "TOOL_SLOT_OUT_OF_RANGE",
            SlotOccupied(_) => "TOOL_SLOT_OCCUPIED",
            SlotEmpty(_) => "TOOL_SLOT_EMPTY",
            InvalidPlacement => "TOOL_INVALID_PLACEMENT",
            InvalidName => "TOOL_INVALID_NAME",
            NoNameTag(_) => "TOOL_NO_NAME_TAG",
            AlreadyActivated(_) => "TOOL_ALREADY_ACTIVATED",
            NoStatTrak(_) => "TOOL_NO_STAT_TRAK",
        }
    }
}
