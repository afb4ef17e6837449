//! Data-driven inventory content.
//!
//! This crate turns data files into the read-only inputs of `inventory-core`:
//! - Item schema catalogs (data-driven via RON)
//! - Simulator configuration (data-driven via TOML)
//!
//! Content is consumed through the core's `StaticData` boundary and never
//! appears in inventory state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{SchemaCatalog, SchemaCatalogError};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SchemaLoader};
