//! Class signature abilities.
//!
//! Each class maps to exactly one [`AbilityKind`] from a closed catalog. An
//! ability is gated by a cooldown counter (see [`crate::state::Cooldowns`]);
//! when it is not ready the combatant falls back to a basic physical attack.
//! [`Activation::Companion`] abilities fire in addition to the round's action
//! instead of replacing it.

mod resolve;

pub use resolve::take_action;

/// Cooldown key of a signature ability.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKey {
    Mending,
    ReflectStance,
    DodgeStance,
    Flurry,
    ArcaneBurst,
    Beast,
    Retribution,
}

/// How a ready ability interacts with the round's basic action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Replaces the basic attack on rounds it is ready.
    Replace,
    /// Resolves after the round's action, every time it is ready.
    Companion,
}

/// Signature effect with its magnitudes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Self-heal: `missing_hp × missing HP + cap_scale × cap`.
    Mending { missing_hp: f64, cap_scale: f64 },

    /// Arms a reflect of `fraction` of the next mitigated hit taken.
    ReflectStance { fraction: f64 },

    /// Arms a dodge that nullifies the next incoming hit.
    DodgeStance,

    /// `hits` guaranteed physical hits. The first uses attack alone, the
    /// rest use `attack + cap_blend × cap`.
    Flurry { hits: u32, cap_blend: f64 },

    /// Magical burst scaled by `scale`, ignoring `mitigation_ignore` of the
    /// target's resistance.
    ArcaneBurst { scale: f64, mitigation_ignore: f64 },

    /// Pet strike every time it is ready: `cap_fraction × cap` plus
    /// `growth_per_attack` per basic attack landed so far, ignoring
    /// `resist_ignore` of the target's resistance.
    Beast {
        cap_fraction: f64,
        resist_ignore: f64,
        growth_per_attack: f64,
    },

    /// Returns `return_fraction` of the damage banked since last use and
    /// heals `heal_fraction` of it.
    Retribution {
        return_fraction: f64,
        heal_fraction: f64,
    },
}

impl AbilityKind {
    pub fn key(&self) -> AbilityKey {
        match self {
            AbilityKind::Mending { .. } => AbilityKey::Mending,
            AbilityKind::ReflectStance { .. } => AbilityKey::ReflectStance,
            AbilityKind::DodgeStance => AbilityKey::DodgeStance,
            AbilityKind::Flurry { .. } => AbilityKey::Flurry,
            AbilityKind::ArcaneBurst { .. } => AbilityKey::ArcaneBurst,
            AbilityKind::Beast { .. } => AbilityKey::Beast,
            AbilityKind::Retribution { .. } => AbilityKey::Retribution,
        }
    }

    pub fn activation(&self) -> Activation {
        match self {
            AbilityKind::Beast { .. } => Activation::Companion,
            _ => Activation::Replace,
        }
    }

    /// Whether the ability deals damage (and is therefore subject to wards).
    pub fn is_offensive(&self) -> bool {
        matches!(
            self,
            AbilityKind::Flurry { .. }
                | AbilityKind::ArcaneBurst { .. }
                | AbilityKind::Beast { .. }
                | AbilityKind::Retribution { .. }
        )
    }
}
