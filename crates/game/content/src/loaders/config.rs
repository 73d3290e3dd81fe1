//! Balance configuration loader.

use std::path::Path;

use duel_core::DuelConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`DuelConfig`] from a TOML file.
    ///
    /// Missing sections fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<DuelConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    /// Parse config TOML text.
    pub fn parse(content: &str) -> LoadResult<DuelConfig> {
        let config: DuelConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}
