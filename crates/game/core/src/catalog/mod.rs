//! Read-only static tables.
//!
//! Races, classes, weapons, passives and awakenings are owned by content
//! collaborators and consumed through [`CatalogOracle`]. Lookups return
//! `Option`: an id that is missing from the tables contributes nothing and is
//! reported in the intro step instead of aborting the match.
mod awakening;
mod class;
mod passive;
mod race;
mod weapon;

use std::collections::BTreeMap;

pub use awakening::{AwakeningDef, AwakeningGuard, AwakeningRevive, HighHpBonus};
pub use class::ClassDef;
pub use passive::{PassiveDef, PassiveEffect};
pub use race::{RaceDef, RaceTrait, SpeedDuel};
pub use weapon::{WeaponDef, WeaponEffect};

/// Oracle providing archetype and equipment definitions.
pub trait CatalogOracle: Send + Sync {
    fn race(&self, id: &str) -> Option<&RaceDef>;
    fn class(&self, id: &str) -> Option<&ClassDef>;
    fn weapon(&self, id: &str) -> Option<&WeaponDef>;
    fn passive(&self, id: &str) -> Option<&PassiveDef>;
    /// Awakening unlocked by a race, if any.
    fn awakening(&self, race: &str) -> Option<&AwakeningDef>;
}

/// In-memory catalog keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Catalog {
    pub races: BTreeMap<String, RaceDef>,
    pub classes: BTreeMap<String, ClassDef>,
    pub weapons: BTreeMap<String, WeaponDef>,
    pub passives: BTreeMap<String, PassiveDef>,
    /// Keyed by race id.
    pub awakenings: BTreeMap<String, AwakeningDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_race(mut self, race: RaceDef) -> Self {
        self.races.insert(race.id.clone(), race);
        self
    }

    pub fn with_class(mut self, class: ClassDef) -> Self {
        self.classes.insert(class.id.clone(), class);
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponDef) -> Self {
        self.weapons.insert(weapon.id.clone(), weapon);
        self
    }

    pub fn with_passive(mut self, passive: PassiveDef) -> Self {
        self.passives.insert(passive.id.clone(), passive);
        self
    }

    pub fn with_awakening(mut self, awakening: AwakeningDef) -> Self {
        self.awakenings.insert(awakening.race.clone(), awakening);
        self
    }

    pub fn len(&self) -> usize {
        self.races.len()
            + self.classes.len()
            + self.weapons.len()
            + self.passives.len()
            + self.awakenings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogOracle for Catalog {
    fn race(&self, id: &str) -> Option<&RaceDef> {
        self.races.get(id)
    }

    fn class(&self, id: &str) -> Option<&ClassDef> {
        self.classes.get(id)
    }

    fn weapon(&self, id: &str) -> Option<&WeaponDef> {
        self.weapons.get(id)
    }

    fn passive(&self, id: &str) -> Option<&PassiveDef> {
        self.passives.get(id)
    }

    fn awakening(&self, race: &str) -> Option<&AwakeningDef> {
        self.awakenings.get(race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatDelta;

    #[test]
    fn lookups_are_by_id() {
        let catalog = Catalog::new()
            .with_race(RaceDef::new("human", "Human").flat(StatDelta::new(10, 2, 2, 2, 2, 0)))
            .with_weapon(WeaponDef::new("club", "Club"));

        assert!(catalog.race("human").is_some());
        assert!(catalog.race("gnome").is_none());
        assert!(catalog.weapon("club").is_some());
        assert!(catalog.awakening("human").is_none());
        assert_eq!(catalog.len(), 2);
    }
}
