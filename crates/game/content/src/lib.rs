//! Data-driven duel content and loaders.
//!
//! This crate houses the static tables the duel engine consumes and provides
//! loaders for RON/TOML data files:
//! - Race, class, weapon, passive and awakening catalog (RON)
//! - Balance configuration (TOML)
//! - Sample matchups (RON)
//!
//! The shipped files under `data/` are embedded at compile time and exposed
//! through [`builtin`], so tests and tools can run without a data directory.
//!
//! All loaders use duel-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogFile, CatalogLoader, ConfigLoader, Content, ContentFactory, Matchup, MatchupLoader,
};
