//! Race/class/weapon/passive/awakening catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use duel_core::{AwakeningDef, Catalog, ClassDef, PassiveDef, RaceDef, WeaponDef};

use crate::loaders::{LoadResult, read_file};

/// On-disk catalog layout: plain lists, keyed by id once loaded.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CatalogFile {
    pub races: Vec<RaceDef>,
    pub classes: Vec<ClassDef>,
    pub weapons: Vec<WeaponDef>,
    pub passives: Vec<PassiveDef>,
    pub awakenings: Vec<AwakeningDef>,
}

impl CatalogFile {
    /// Index every list by id, rejecting duplicates and empty passives.
    pub fn into_catalog(self) -> LoadResult<Catalog> {
        for passive in &self.passives {
            if passive.levels.is_empty() {
                anyhow::bail!("Passive '{}' defines no levels", passive.id);
            }
        }

        Ok(Catalog {
            races: index("race", self.races, |r| r.id.clone())?,
            classes: index("class", self.classes, |c| c.id.clone())?,
            weapons: index("weapon", self.weapons, |w| w.id.clone())?,
            passives: index("passive", self.passives, |p| p.id.clone())?,
            awakenings: index("awakening", self.awakenings, |a| a.race.clone())?,
        })
    }
}

fn index<T>(
    kind: &str,
    items: Vec<T>,
    key: impl Fn(&T) -> String,
) -> LoadResult<BTreeMap<String, T>> {
    let mut map = BTreeMap::new();
    for item in items {
        let id = key(&item);
        if map.contains_key(&id) {
            anyhow::bail!("Duplicate {} id '{}' in catalog", kind, id);
        }
        map.insert(id, item);
    }
    Ok(map)
}

/// Loader for the static catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog from a RON file.
    ///
    /// RON format: [`CatalogFile`]. Files should start with
    /// `#![enable(implicit_some)]` so optional fields can be written bare.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
    }

    /// Parse catalog RON text.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        file.into_catalog()
    }
}
