//! Raw damage formula.

use crate::config::DamageParams;

// ============================================================================
// Damage Kind
// ============================================================================

/// Which stat pair a hit scales from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageKind {
    /// Attack against defense.
    Physical,
    /// Capacity against resistance.
    Magical,
    /// Fixed amount, no mitigation and no crit.
    True,
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Calculate raw damage before crits and multipliers.
///
/// # Formula
///
/// ```text
/// damage = max(minimum, round(offensive - mitigation_factor × mitigating))
/// ```
///
/// With the default parameters (`0.5`, `1`) a hit always lands for at least
/// 1, even when the mitigating stat is twice the offensive one or more.
pub fn raw_damage(offensive: f64, mitigating: f64, params: &DamageParams) -> u32 {
    let value = (offensive - params.mitigation_factor * mitigating).round();
    clamp_damage(value, params.minimum)
}

/// Round a multiplied damage value and apply the floor.
pub fn clamp_damage(value: f64, minimum: u32) -> u32 {
    let rounded = value.round();
    if rounded.is_nan() || rounded < f64::from(minimum) {
        return minimum;
    }
    if rounded >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    rounded as u32
}
