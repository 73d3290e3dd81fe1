//! Critical hit chance and multiplier.

use crate::config::CritParams;
use crate::state::Combatant;

/// Crit chance of `attacker`, clamped to `[0, 1]`.
///
/// # Formula
///
/// ```text
/// chance = base + class + race + weapon + awakening + speed duel
/// ```
pub fn crit_chance(attacker: &Combatant, params: &CritParams) -> f64 {
    (params.base_chance + attacker.kit.crit_chance() + attacker.matchup.edge.crit_chance)
        .clamp(0.0, 1.0)
}

/// Crit multiplier of `attacker` against `defender`.
///
/// # Formula
///
/// ```text
/// multiplier = base × (1 + weapon + awakening + speed duel)
/// warded     = 1 + (multiplier - 1) × (1 - defender crit ward)
/// ```
///
/// The ward only eats into the bonus portion, so a warded crit never hits
/// softer than a normal hit.
pub fn crit_multiplier(attacker: &Combatant, defender: &Combatant, params: &CritParams) -> f64 {
    let bonus = attacker.kit.crit_damage() + attacker.matchup.edge.crit_damage;
    let multiplier = params.base_multiplier * (1.0 + bonus);
    let ward = defender.kit.crit_ward();
    if ward <= 0.0 {
        return multiplier;
    }
    1.0 + (multiplier - 1.0).max(0.0) * (1.0 - ward)
}
