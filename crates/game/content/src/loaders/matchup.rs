//! Sample matchup loader.

use std::path::Path;

use duel_core::{CombatantSpec, MatchKind};

use crate::loaders::{LoadResult, read_file};

/// A named pair of combatant records and the kind of match to run.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Matchup {
    pub name: String,
    #[serde(default)]
    pub kind: MatchKind,
    pub first: CombatantSpec,
    pub second: CombatantSpec,
}

/// Loader for matchups from RON files.
pub struct MatchupLoader;

impl MatchupLoader {
    /// Load matchups from a RON file.
    ///
    /// RON format: `Vec<Matchup>`. Names must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<Matchup>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load matchups {}: {}", path.display(), e))
    }

    /// Parse matchup RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Matchup>> {
        let matchups: Vec<Matchup> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse matchup RON: {}", e))?;

        for (index, matchup) in matchups.iter().enumerate() {
            if matchups[..index].iter().any(|m| m.name == matchup.name) {
                anyhow::bail!("Duplicate matchup name '{}'", matchup.name);
            }
        }
        Ok(matchups)
    }

    /// Find a matchup by name.
    pub fn find<'a>(matchups: &'a [Matchup], name: &str) -> Option<&'a Matchup> {
        matchups.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::Role;

    #[test]
    fn parses_boss_matchup() {
        let matchups = MatchupLoader::parse(
            r#"#![enable(implicit_some)]
            [
                (
                    name: "wyrm",
                    kind: boss,
                    first: (
                        name: "Hero",
                        race: "human",
                        level: 20,
                        stats: (hp: 300, auto: 40, def: 20, cap: 10, rescap: 10, spd: 12),
                    ),
                    second: (
                        name: "Wyrm",
                        stats: (hp: 900, auto: 35, def: 30, cap: 0, rescap: 30, spd: 8),
                        shield: 120,
                        role: Boss((shield_burst: 0.5)),
                    ),
                ),
            ]"#,
        )
        .unwrap();

        let wyrm = MatchupLoader::find(&matchups, "wyrm").unwrap();
        assert_eq!(wyrm.kind, MatchKind::Boss);
        assert_eq!(wyrm.first.race.as_deref(), Some("human"));
        assert!(wyrm.first.awakening);
        assert_eq!(wyrm.second.role.shield_burst(), Some(0.5));
        assert!(matches!(wyrm.second.role, Role::Boss(_)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = r#"[
            (name: "a", first: (name: "x"), second: (name: "y")),
            (name: "a", first: (name: "x"), second: (name: "y")),
        ]"#;
        assert!(MatchupLoader::parse(text).is_err());
    }
}
