//! Deterministic inventory simulation shared by embedding applications.
//!
//! `inventory-core` owns the authoritative model of a user's item collection:
//! the items themselves, the external identity index layered on top of them,
//! the equip/loadout table, and the tool state machine that mutates items.
//! Every mutation flows through [`simulator::InventorySimulator`], which queues
//! at most one [`response::Response`] per request for the embedding
//! application to drain later.
pub mod config;
pub mod env;
pub mod error;
pub mod item;
pub mod response;
pub mod simulator;
pub mod state;
pub mod tool;

pub use config::SimulatorConfig;
pub use env::{
    Capabilities, ContainerSchema, Env, ItemSchemaEntry, ItemSchemaEntryBuilder, LootEntry,
    PcgRng, RngOracle, SchemaTable, StaticData, StatTrakTransferRule, compute_seed,
};
pub use error::{ErrorSeverity, InvariantViolation, SimulatorError};
pub use item::{AppliedSticker, DefinitionId, GameItem, Item, ItemCategory, ItemData, ItemId};
pub use response::{Response, ResponseQueue};
pub use simulator::InventorySimulator;
pub use state::{
    IdentityIndex, InventoryState, ItemCollection, ItemHandle, Loadout, LoadoutSlot, Removed,
    Team,
};
pub use tool::{
    StickerPlacement, ToolAction, ToolOutcome, ToolRejection, ToolUser, UseToolRequest,
};
