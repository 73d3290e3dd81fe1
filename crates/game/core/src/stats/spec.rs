//! Combatant input record.

use super::block::{StatDelta, StatRecord, StatScale};
use crate::state::Role;

/// Equipped passive and its level (1-based).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveSlot {
    pub id: String,
    pub level: u32,
}

/// The stat-block shape the engine accepts for one side of a match.
///
/// Player records carry archetype ids that are resolved against the
/// [`crate::catalog::CatalogOracle`]; bosses and dummies are pre-built
/// records that usually leave them empty. Unknown ids are not errors: they
/// contribute no bonus and are noted in the intro step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatantSpec {
    pub name: String,
    pub race: Option<String>,
    pub class: Option<String>,
    pub level: u32,
    /// Raw per-level stats.
    pub stats: StatRecord,
    /// Player-allocated level-up points.
    pub allocation: StatDelta,
    pub weapon: Option<String>,
    pub passive: Option<PassiveSlot>,
    /// Whether the racial awakening may activate once the level threshold is met.
    pub awakening: bool,
    /// Post-hoc equipment upgrade layer, applied last.
    pub upgrade: StatScale,
    /// Starting shield.
    pub shield: u32,
    pub role: Role,
}

impl Default for CombatantSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            race: None,
            class: None,
            level: 1,
            stats: StatRecord::default(),
            allocation: StatDelta::default(),
            weapon: None,
            passive: None,
            awakening: true,
            upgrade: StatScale::default(),
            shield: 0,
            role: Role::Player,
        }
    }
}

impl CombatantSpec {
    pub fn new(name: impl Into<String>, stats: StatRecord) -> Self {
        Self {
            name: name.into(),
            stats,
            ..Self::default()
        }
    }

    pub fn race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn allocation(mut self, allocation: StatDelta) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    pub fn passive(mut self, id: impl Into<String>, level: u32) -> Self {
        self.passive = Some(PassiveSlot {
            id: id.into(),
            level,
        });
        self
    }

    pub fn upgrade(mut self, upgrade: StatScale) -> Self {
        self.upgrade = upgrade;
        self
    }

    pub fn shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn without_awakening(mut self) -> Self {
        self.awakening = false;
        self
    }
}
