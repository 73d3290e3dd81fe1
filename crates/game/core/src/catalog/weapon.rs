use crate::stats::{Conversion, StatDelta};

/// Weapon definition: flat deltas, derived conversions, crit bonuses and
/// proc effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conversions: Vec<Conversion>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_damage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<WeaponEffect>,
}

/// Triggered behavior of an equipped weapon.
///
/// On-hit effects (`Bleed`, `StunEvery`, `LifeSteal`, `Mark`) fire on basic
/// attacks and physical ability hits that land.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponEffect {
    /// Adds `stacks` bleed stacks. With a `rate`, each tick deals that
    /// fraction of max HP instead of the per-stack damage.
    Bleed { stacks: u32, rate: Option<f64> },

    /// Every `attacks`-th landed hit stuns for `turns` actions.
    StunEvery { attacks: u32, turns: u32 },

    /// Heals `fraction` of damage dealt.
    LifeSteal { fraction: f64 },

    /// `bonus` priority on rounds that are multiples of `period`.
    Initiative { period: u32, bonus: i32 },

    /// Outgoing damage × `(1 + bonus)` on rounds that are multiples of `period`.
    Surge { period: u32, bonus: f64 },

    /// Marks the target for `rounds`; the wielder deals `(1 + bonus)` to it.
    Mark { bonus: f64, rounds: u32 },

    /// Every `every`-th magical cast deals `(1 + bonus)`.
    CastEcho { every: u32, bonus: f64 },
}

impl WeaponDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flat: StatDelta::default(),
            conversions: Vec::new(),
            crit_chance: 0.0,
            crit_damage: 0.0,
            effects: Vec::new(),
        }
    }

    pub fn flat(mut self, flat: StatDelta) -> Self {
        self.flat = flat;
        self
    }

    pub fn convert(mut self, conversion: Conversion) -> Self {
        self.conversions.push(conversion);
        self
    }

    pub fn crit(mut self, chance: f64, damage: f64) -> Self {
        self.crit_chance = chance;
        self.crit_damage = damage;
        self
    }

    pub fn with_effect(mut self, effect: WeaponEffect) -> Self {
        self.effects.push(effect);
        self
    }
}
