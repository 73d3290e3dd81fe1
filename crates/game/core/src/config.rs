//! Balance configuration threaded explicitly through every match.
//!
//! Nothing in the engine reads module-level mutable state: formula
//! coefficients, round caps and cooldown periods all come from the
//! [`DuelConfig`] handed to [`crate::engine::DuelEngine`]. Concurrent bulk
//! runs share one config immutably.

use crate::ability::AbilityKey;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DuelConfig {
    pub damage: DamageParams,
    pub crit: CritParams,
    pub rounds: RoundCaps,
    pub cooldowns: CooldownPeriods,
    pub bleed: BleedParams,
}

impl DuelConfig {
    pub fn new() -> Self {
        Self {
            damage: DamageParams::default(),
            crit: CritParams::default(),
            rounds: RoundCaps::default(),
            cooldowns: CooldownPeriods::default(),
            bleed: BleedParams::default(),
        }
    }

    /// Configured period of an ability, never below 1.
    pub fn period(&self, key: AbilityKey) -> u32 {
        self.cooldowns.get(key).max(1)
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Coefficients of the base damage formula.
///
/// `damage = max(minimum, round(offensive − mitigation_factor × mitigating))`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    pub mitigation_factor: f64,
    pub minimum: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            mitigation_factor: 0.5,
            minimum: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CritParams {
    /// Chance every combatant starts with, before class/race/weapon bonuses.
    pub base_chance: f64,
    /// Multiplier applied on a crit before additive crit-damage bonuses.
    pub base_multiplier: f64,
}

impl Default for CritParams {
    fn default() -> Self {
        Self {
            base_chance: 0.10,
            base_multiplier: 1.5,
        }
    }
}

/// Hard round caps per match kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundCaps {
    pub standard: u32,
    pub boss: u32,
    pub damage_test: u32,
}

impl Default for RoundCaps {
    fn default() -> Self {
        Self {
            standard: 30,
            boss: 10,
            damage_test: 10,
        }
    }
}

/// Cooldown period, in rounds, of each signature ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownPeriods {
    pub mending: u32,
    pub reflect_stance: u32,
    pub dodge_stance: u32,
    pub flurry: u32,
    pub arcane_burst: u32,
    pub beast: u32,
    pub retribution: u32,
}

impl CooldownPeriods {
    pub fn get(&self, key: AbilityKey) -> u32 {
        match key {
            AbilityKey::Mending => self.mending,
            AbilityKey::ReflectStance => self.reflect_stance,
            AbilityKey::DodgeStance => self.dodge_stance,
            AbilityKey::Flurry => self.flurry,
            AbilityKey::ArcaneBurst => self.arcane_burst,
            AbilityKey::Beast => self.beast,
            AbilityKey::Retribution => self.retribution,
        }
    }
}

impl Default for CooldownPeriods {
    fn default() -> Self {
        Self {
            mending: 4,
            reflect_stance: 3,
            dodge_stance: 3,
            flurry: 3,
            arcane_burst: 2,
            beast: 1,
            retribution: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BleedParams {
    /// Damage per stack per round when the bleed has no max-HP rate.
    pub damage_per_stack: u32,
    pub max_stacks: u32,
}

impl Default for BleedParams {
    fn default() -> Self {
        Self {
            damage_per_stack: 3,
            max_stacks: 10,
        }
    }
}
