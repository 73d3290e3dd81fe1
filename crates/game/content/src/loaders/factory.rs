//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use duel_core::{Catalog, DuelConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, Matchup, MatchupLoader};

/// Everything a balance run needs.
#[derive(Clone, Debug, Default)]
pub struct Content {
    pub catalog: Catalog,
    pub config: DuelConfig,
    pub matchups: Vec<Matchup>,
}

impl Content {
    pub fn matchup(&self, name: &str) -> Option<&Matchup> {
        MatchupLoader::find(&self.matchups, name)
    }
}

/// Content factory that loads all duel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// ├── balance.toml
/// └── matchups.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Load balance configuration from `balance.toml`.
    pub fn load_config(&self) -> LoadResult<DuelConfig> {
        ConfigLoader::load(&self.data_dir.join("balance.toml"))
    }

    /// Load matchups from `matchups.ron`.
    pub fn load_matchups(&self) -> LoadResult<Vec<Matchup>> {
        MatchupLoader::load(&self.data_dir.join("matchups.ron"))
    }

    /// Load all three files.
    pub fn load(&self) -> LoadResult<Content> {
        Ok(Content {
            catalog: self.load_catalog()?,
            config: self.load_config()?,
            matchups: self.load_matchups()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_names_the_file() {
        let err = ContentFactory::new("/nonexistent/duel").load_catalog().unwrap_err();
        assert!(err.to_string().contains("catalog.ron"));
    }
}
