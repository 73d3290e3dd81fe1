//! Outgoing and incoming damage multiplier stacks.
//!
//! Each stack is a product of independent factors, so the order in which
//! the factors are collected does not matter.

use crate::catalog::{PassiveEffect, WeaponEffect};
use crate::state::Combatant;

/// `true` on rounds that are positive multiples of `period`.
pub fn on_period(round: u32, period: u32) -> bool {
    period > 0 && round > 0 && round % period == 0
}

/// Product of the attacker-side factors for a hit landed on `round`.
///
/// Low-HP fury, awakening high-HP bonus, the mark the attacker placed on
/// the defender, weapon and passive surges, and the opening aura.
pub fn outgoing(attacker: &Combatant, defender: &Combatant, round: u32) -> f64 {
    let mut factor = 1.0;
    let hp = attacker.hp_fraction();

    if let Some((threshold, bonus)) = attacker.kit.race.as_ref().and_then(|r| r.low_hp_fury()) {
        if hp < threshold {
            factor *= 1.0 + bonus;
        }
    }
    if let Some(high) = attacker.kit.awakening.as_ref().and_then(|a| a.high_hp) {
        if hp >= high.threshold {
            factor *= 1.0 + high.bonus;
        }
    }
    if let Some(mark) = defender.status.mark {
        factor *= 1.0 + mark.bonus;
    }
    for effect in attacker.kit.weapon_effects() {
        if let WeaponEffect::Surge { period, bonus } = effect {
            if on_period(round, *period) {
                factor *= 1.0 + bonus;
            }
        }
    }
    match attacker.kit.passive {
        Some(PassiveEffect::Surge { period, bonus }) if on_period(round, period) => {
            factor *= 1.0 + bonus;
        }
        Some(PassiveEffect::OpeningAura { rounds, bonus }) if round <= rounds => {
            factor *= 1.0 + bonus;
        }
        _ => {}
    }
    factor
}

/// Product of the defender-side factors, consuming one guard hit if any
/// remain.
pub fn incoming(defender: &mut Combatant) -> f64 {
    let mut factor = defender.kit.damage_taken();

    if defender.status.guard_hits > 0 {
        if let Some(guard) = defender.kit.awakening.as_ref().and_then(|a| a.guard) {
            defender.status.guard_hits -= 1;
            factor *= guard.multiplier;
        }
    }
    if let Some(bonus) = defender.status.spectral {
        factor *= 1.0 + bonus;
    }
    factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AwakeningDef, Catalog, PassiveDef, RaceDef, RaceTrait, WeaponDef};
    use crate::state::{Mark, Side};
    use crate::stats::{CombatantSpec, StatRecord};

    fn catalog() -> Catalog {
        Catalog::new()
            .with_race(
                RaceDef::new("orc", "Orc").with_trait(RaceTrait::LowHpFury {
                    threshold: 0.3,
                    bonus: 0.5,
                }),
            )
            .with_race(RaceDef::new("elf", "Elf"))
            .with_awakening(AwakeningDef::new("elf", 1).guard(2, 0.5))
            .with_weapon(WeaponDef::new("tidal", "Tidal Blade").with_effect(WeaponEffect::Surge {
                period: 3,
                bonus: 0.2,
            }))
            .with_passive(PassiveDef::new(
                "dawn",
                "Dawn",
                vec![PassiveEffect::OpeningAura {
                    rounds: 2,
                    bonus: 0.1,
                }],
            ))
    }

    fn build(spec: CombatantSpec, side: Side) -> Combatant {
        Combatant::build(&spec, side, &catalog()).unwrap()
    }

    fn base(name: &str) -> CombatantSpec {
        CombatantSpec::new(name, StatRecord::full(100, 20, 10, 10, 10, 10))
    }

    #[test]
    fn neutral_is_one() {
        let a = build(base("A"), Side::First);
        let mut b = build(base("B"), Side::Second);
        assert_eq!(outgoing(&a, &b, 1), 1.0);
        assert_eq!(incoming(&mut b), 1.0);
    }

    #[test]
    fn fury_only_below_threshold() {
        let mut a = build(base("A").race("orc"), Side::First);
        let b = build(base("B"), Side::Second);
        assert_eq!(outgoing(&a, &b, 1), 1.0);
        a.lose_hp(75);
        assert_eq!(outgoing(&a, &b, 1), 1.5);
    }

    #[test]
    fn surge_and_aura_follow_rounds() {
        let a = build(base("A").weapon("tidal").passive("dawn", 1), Side::First);
        let b = build(base("B"), Side::Second);
        assert!((outgoing(&a, &b, 1) - 1.1).abs() < 1e-9);
        assert_eq!(outgoing(&a, &b, 3), 1.2);
        assert_eq!(outgoing(&a, &b, 4), 1.0);
    }

    #[test]
    fn mark_applies_to_marked_defender() {
        let a = build(base("A"), Side::First);
        let mut b = build(base("B"), Side::Second);
        b.status.mark = Some(Mark {
            bonus: 0.25,
            rounds: 1,
        });
        assert_eq!(outgoing(&a, &b, 1), 1.25);
    }

    #[test]
    fn guard_budget_is_consumed() {
        let mut b = build(base("B").race("elf").level(5), Side::Second);
        assert_eq!(incoming(&mut b), 0.5);
        assert_eq!(incoming(&mut b), 0.5);
        assert_eq!(incoming(&mut b), 1.0);
        assert_eq!(b.status.guard_hits, 0);
    }
}
