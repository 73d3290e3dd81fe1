//! Content loaders for reading duel data from files.
//!
//! Each loader exposes `load(path)` for files on disk and `parse(text)` for
//! already-read content (used by [`crate::builtin`]).

pub mod catalog;
pub mod config;
pub mod factory;
pub mod matchup;

pub use catalog::{CatalogFile, CatalogLoader};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use matchup::{Matchup, MatchupLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
