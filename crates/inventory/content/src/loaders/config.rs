//! Simulator configuration loader.

use std::path::Path;

use anyhow::Context;
use inventory_core::SimulatorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for simulator configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`SimulatorConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<SimulatorConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<SimulatorConfig> {
        let config: SimulatorConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.sticker_wear_step > 0.0 && config.sticker_wear_step <= 1.0) {
            anyhow::bail!(
                "sticker_wear_step must be in (0, 1], got {}",
                config.sticker_wear_step
            );
        }
        if config.max_name_tag_length == 0 {
            anyhow::bail!("max_name_tag_length must be positive");
        }

        tracing::debug!(seed = config.seed, "loaded simulator config");
        Ok(config)
    }
}
