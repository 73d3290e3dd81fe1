//! Per-round action order.

use crate::catalog::{PassiveEffect, WeaponEffect};
use crate::combat::on_period;
use crate::rng::CombatRng;
use crate::state::{Combatant, Side};

/// Decided action order for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnOrder {
    pub leader: Side,
    /// Priority of each side, indexed by [`Side::index`].
    pub priority: [i64; 2],
    /// The order came from a coin flip.
    pub tie: bool,
}

/// Priority of `combatant` on `round`.
///
/// # Formula
///
/// ```text
/// priority = spd
///          + weapon/passive initiative   (rounds that are multiples of the period)
///          ± tempo amount                (favoured parity: +, other parity: −)
/// ```
pub fn priority(combatant: &Combatant, round: u32) -> i64 {
    let mut value = i64::from(combatant.stats.spd);

    for effect in combatant.kit.weapon_effects() {
        if let WeaponEffect::Initiative { period, bonus } = effect {
            if on_period(round, *period) {
                value += i64::from(*bonus);
            }
        }
    }
    match combatant.kit.passive {
        Some(PassiveEffect::Initiative { period, bonus }) if on_period(round, period) => {
            value += i64::from(bonus);
        }
        Some(PassiveEffect::Tempo {
            favours_odd,
            amount,
        }) => {
            let odd = round % 2 == 1;
            if odd == favours_odd {
                value += i64::from(amount);
            } else {
                value -= i64::from(amount);
            }
        }
        _ => {}
    }
    value
}

/// Higher priority acts first; exact ties are an unweighted coin flip that
/// favours [`Side::First`] on `true`.
pub fn turn_order(
    first: &Combatant,
    second: &Combatant,
    round: u32,
    rng: &mut dyn CombatRng,
) -> TurnOrder {
    let priority = [priority(first, round), priority(second, round)];
    let (leader, tie) = match priority[0].cmp(&priority[1]) {
        std::cmp::Ordering::Greater => (Side::First, false),
        std::cmp::Ordering::Less => (Side::Second, false),
        std::cmp::Ordering::Equal => {
            let leader = if rng.coin_flip() {
                Side::First
            } else {
                Side::Second
            };
            (leader, true)
        }
    };
    TurnOrder {
        leader,
        priority,
        tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, PassiveDef, WeaponDef};
    use crate::rng::ScriptedRng;
    use crate::stats::{CombatantSpec, StatRecord};

    fn catalog() -> Catalog {
        Catalog::new()
            .with_weapon(WeaponDef::new("quickdraw", "Quickdraw").with_effect(
                WeaponEffect::Initiative {
                    period: 2,
                    bonus: 10,
                },
            ))
            .with_passive(PassiveDef::new(
                "rhythm",
                "Rhythm",
                vec![PassiveEffect::Tempo {
                    favours_odd: true,
                    amount: 3,
                }],
            ))
    }

    fn build(spec: CombatantSpec, side: Side) -> Combatant {
        Combatant::build(&spec, side, &catalog()).unwrap()
    }

    fn runner(name: &str, spd: i64) -> CombatantSpec {
        CombatantSpec::new(name, StatRecord::full(100, 10, 10, 10, 10, spd))
    }

    #[test]
    fn faster_side_leads() {
        let a = build(runner("A", 12), Side::First);
        let b = build(runner("B", 15), Side::Second);
        let order = turn_order(&a, &b, 1, &mut ScriptedRng::never());
        assert_eq!(order.leader, Side::Second);
        assert!(!order.tie);
    }

    #[test]
    fn tie_uses_coin_flip() {
        let a = build(runner("A", 10), Side::First);
        let b = build(runner("B", 10), Side::Second);

        let mut heads = ScriptedRng::new([1]);
        let mut tails = ScriptedRng::new([0]);
        assert_eq!(turn_order(&a, &b, 1, &mut heads).leader, Side::First);
        assert_eq!(turn_order(&a, &b, 1, &mut tails).leader, Side::Second);
        assert_eq!(heads.consumed(), 1);
    }

    #[test]
    fn initiative_on_period_rounds() {
        let a = build(runner("A", 10).weapon("quickdraw"), Side::First);
        assert_eq!(priority(&a, 1), 10);
        assert_eq!(priority(&a, 2), 20);
        assert_eq!(priority(&a, 4), 20);
    }

    #[test]
    fn tempo_alternates() {
        let a = build(runner("A", 10).passive("rhythm", 1), Side::First);
        assert_eq!(priority(&a, 1), 13);
        assert_eq!(priority(&a, 2), 7);
    }
}
