//! Per-match combatant state.
//!
//! This module owns the [`Combatant`] entity and the transient status store
//! layered on top of its composed stats: cooldown counters, shield, stun,
//! bleed, marks and the one-shot [`Charge`] budgets. Nothing here survives a
//! match.
mod charge;
mod combatant;
mod cooldown;
mod kit;
mod status;

pub use charge::Charge;
pub use combatant::{Absorption, Combatant, Matchup};
pub use cooldown::Cooldowns;
pub use kit::Kit;
pub use status::{Bleed, Counter, Mark, StatusFlags};

/// Which side of the match a combatant is on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// What kind of record a combatant was built from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Player,
    /// Scripted boss. Wins by extinction when the boss round cap is reached.
    Boss(BossTraits),
    /// Damage-test dummy. Never acts.
    Dummy,
}

/// Boss-only mechanics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossTraits {
    /// When the starting shield breaks, deal this fraction of it back to
    /// the attacker once.
    pub shield_burst: Option<f64>,
}

impl Role {
    pub fn is_boss(&self) -> bool {
        matches!(self, Role::Boss(_))
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, Role::Dummy)
    }

    pub fn shield_burst(&self) -> Option<f64> {
        match self {
            Role::Boss(traits) => traits.shield_burst,
            _ => None,
        }
    }
}
