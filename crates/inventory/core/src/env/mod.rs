//! Traits describing read-only data the simulator consumes.
//!
//! The schema oracle ([`StaticData`]) answers definition lookups and the RNG
//! oracle drives container rolls. [`Env`] bundles both so the tool state
//! machine can reach everything it needs without coupling to concrete
//! implementations.
mod rng;
mod schema;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use schema::{
    Capabilities, ContainerSchema, ItemSchemaEntry, ItemSchemaEntryBuilder, LootEntry,
    SchemaTable, StatTrakTransferRule, StaticData,
};

use crate::item::DefinitionId;

/// Aggregates the read-only oracles used while applying tools.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    schema: &'a dyn StaticData,
    rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(schema: &'a dyn StaticData, rng: &'a dyn RngOracle) -> Self {
        Self { schema, rng }
    }

    pub fn schema(&self) -> &'a dyn StaticData {
        self.schema
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn lookup(&self, definition: DefinitionId) -> Option<&'a ItemSchemaEntry> {
        self.schema.lookup(definition)
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
