//! Content shipped with the crate, embedded at compile time.

use duel_core::{Catalog, DuelConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, Content, LoadResult, Matchup, MatchupLoader};

pub const CATALOG_RON: &str = include_str!("../data/catalog.ron");
pub const BALANCE_TOML: &str = include_str!("../data/balance.toml");
pub const MATCHUPS_RON: &str = include_str!("../data/matchups.ron");

pub fn catalog() -> LoadResult<Catalog> {
    CatalogLoader::parse(CATALOG_RON)
}

pub fn config() -> LoadResult<DuelConfig> {
    ConfigLoader::parse(BALANCE_TOML)
}

pub fn matchups() -> LoadResult<Vec<Matchup>> {
    MatchupLoader::parse(MATCHUPS_RON)
}

/// All shipped content.
pub fn content() -> LoadResult<Content> {
    Ok(Content {
        catalog: catalog()?,
        config: config()?,
        matchups: matchups()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{AbilityKey, CatalogOracle, MatchKind};

    #[test]
    fn shipped_content_parses() {
        let content = content().unwrap();
        assert_eq!(content.catalog.races.len(), 5);
        assert_eq!(content.catalog.classes.len(), 7);
        assert_eq!(content.config, DuelConfig::default());
        assert_eq!(content.matchups.len(), 4);
    }

    #[test]
    fn every_ability_has_a_class() {
        let catalog = catalog().unwrap();
        for key in [
            AbilityKey::Mending,
            AbilityKey::ReflectStance,
            AbilityKey::DodgeStance,
            AbilityKey::Flurry,
            AbilityKey::ArcaneBurst,
            AbilityKey::Beast,
            AbilityKey::Retribution,
        ] {
            assert!(
                catalog.classes.values().any(|c| c.ability.key() == key),
                "no class uses {key}"
            );
        }
    }

    #[test]
    fn matchup_ids_resolve() {
        let content = content().unwrap();
        for matchup in &content.matchups {
            for spec in [&matchup.first, &matchup.second] {
                if let Some(race) = &spec.race {
                    assert!(content.catalog.race(race).is_some(), "{race}");
                }
                if let Some(class) = &spec.class {
                    assert!(content.catalog.class(class).is_some(), "{class}");
                }
                if let Some(weapon) = &spec.weapon {
                    assert!(content.catalog.weapon(weapon).is_some(), "{weapon}");
                }
                if let Some(passive) = &spec.passive {
                    assert!(content.catalog.passive(&passive.id).is_some(), "{}", passive.id);
                }
            }
        }
        assert_eq!(content.matchup("boss").map(|m| m.kind), Some(MatchKind::Boss));
    }
}
