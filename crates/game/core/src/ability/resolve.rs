//! One combatant's action for a round.

use super::{AbilityKind, Activation};
use crate::catalog::WeaponEffect;
use crate::combat::{Exchange, Hit, resolve_hit};
use crate::engine::Phase;
use crate::state::{Combatant, Counter};

/// Resolve `actor`'s action against `target`.
///
/// Cooldown counters advance first, even when the action is then lost to a
/// stun. A ready replacing ability resolves instead of the basic attack; a
/// ready companion ability resolves after it.
pub fn take_action(x: &mut Exchange<'_>, actor: &mut Combatant, target: &mut Combatant) {
    actor.cooldowns.tick();

    if actor.role.is_dummy() {
        x.journal.note(|| format!("{} stands still", actor.name));
        x.journal.flush(Phase::Action, Some(actor.side), actor, target);
        return;
    }
    if actor.status.stunned_turns > 0 {
        actor.status.stunned_turns -= 1;
        x.journal.note(|| format!("{} is stunned and loses the turn", actor.name));
        x.journal.flush(Phase::Action, Some(actor.side), actor, target);
        return;
    }

    let ready = actor
        .kit
        .ability()
        .filter(|ability| actor.cooldowns.is_ready(ability.key()));

    match ready {
        Some(ability) if ability.activation() == Activation::Replace => {
            signature(x, actor, target, ability);
        }
        _ => basic_attack(x, actor, target),
    }

    if let Some(ability) = ready.filter(|a| a.activation() == Activation::Companion) {
        if actor.is_alive() && target.is_alive() {
            signature(x, actor, target, ability);
        }
    }
}

fn basic_attack(x: &mut Exchange<'_>, actor: &mut Combatant, target: &mut Combatant) {
    actor.status.bump(Counter::BasicAttacks);
    let hit = Hit::physical(
        "a basic attack",
        f64::from(actor.stats.auto),
        f64::from(target.stats.def),
    );
    resolve_hit(x, actor, target, hit);
}

fn signature(
    x: &mut Exchange<'_>,
    actor: &mut Combatant,
    target: &mut Combatant,
    ability: AbilityKind,
) {
    match ability {
        AbilityKind::Mending {
            missing_hp,
            cap_scale,
        } => {
            let amount = f64::from(actor.missing_hp()) * missing_hp + actor.effective_cap() * cap_scale;
            let healed = actor.heal(amount.round().max(0.0) as u32);
            x.journal.note(|| format!("{} mends {} HP", actor.name, healed));
            x.journal.flush(Phase::Action, Some(actor.side), actor, target);
        }

        AbilityKind::ReflectStance { fraction } => {
            actor.status.reflect = Some(fraction);
            x.journal.note(|| {
                format!(
                    "{} takes a reflecting stance ({:.0}%)",
                    actor.name,
                    fraction * 100.0
                )
            });
            x.journal.flush(Phase::Action, Some(actor.side), actor, target);
        }

        AbilityKind::DodgeStance => {
            actor.status.dodge.arm();
            x.journal.note(|| format!("{} readies a dodge", actor.name));
            x.journal.flush(Phase::Action, Some(actor.side), actor, target);
        }

        AbilityKind::Flurry { hits, cap_blend } => {
            let auto = f64::from(actor.stats.auto);
            let blended = auto + cap_blend * actor.effective_cap();
            for index in 0..hits {
                if !actor.is_alive() || !target.is_alive() {
                    break;
                }
                let offensive = if index == 0 { auto } else { blended };
                let hit = Hit::physical("flurry", offensive, f64::from(target.stats.def)).warded(true);
                resolve_hit(x, actor, target, hit);
            }
        }

        AbilityKind::ArcaneBurst {
            scale,
            mitigation_ignore,
        } => {
            let casts = actor.status.bump(Counter::CastsLanded);
            let mut hit = Hit::magical(
                "arcane burst",
                actor.effective_cap(),
                f64::from(target.stats.rescap) * (1.0 - mitigation_ignore),
            )
            .scaled(scale)
            .warded(true);

            let echo = actor.kit.weapon_effects().find_map(|effect| match effect {
                WeaponEffect::CastEcho { every, bonus } if *every > 0 && casts % every == 0 => {
                    Some(*bonus)
                }
                _ => None,
            });
            if let Some(bonus) = echo {
                hit = hit.scaled(1.0 + bonus);
                x.journal.note(|| format!("{}'s spell echoes", actor.name));
            }
            resolve_hit(x, actor, target, hit);
        }

        AbilityKind::Beast {
            cap_fraction,
            resist_ignore,
            growth_per_attack,
        } => {
            let attacks = f64::from(actor.status.counter(Counter::BasicAttacks));
            let offensive = actor.effective_cap() * cap_fraction + growth_per_attack * attacks;
            let hit = Hit::magical(
                "its beast",
                offensive,
                f64::from(target.stats.rescap) * (1.0 - resist_ignore),
            )
            .without_crit()
            .warded(true);
            resolve_hit(x, actor, target, hit);
        }

        AbilityKind::Retribution {
            return_fraction,
            heal_fraction,
        } => {
            let bank = std::mem::take(&mut actor.status.bank);
            if bank == 0 {
                x.journal.note(|| format!("{} has nothing to avenge", actor.name));
                basic_attack(x, actor, target);
                return;
            }
            let bank = bank as f64;
            let hit = Hit::fixed("retribution", bank * return_fraction).warded(true);
            resolve_hit(x, actor, target, hit);

            if actor.is_alive() {
                let healed = actor.heal((bank * heal_fraction).round().max(0.0) as u32);
                if healed > 0 {
                    x.journal.note(|| format!("{} recovers {} HP", actor.name, healed));
                    x.journal.flush(Phase::Action, Some(actor.side), actor, target);
                }
            }
        }
    }
}
