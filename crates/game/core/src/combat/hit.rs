//! Full resolution of a single hit.
//!
//! ```text
//! dodge? → raw damage × scale → ability ward → crit → outgoing × incoming
//!        → shield / HP → lethal check (revives) → shield burst → reflect
//!        → on-hit procs
//! ```
//!
//! Every sub-effect is written to the journal as its own step, in the order
//! it happens.

use bitflags::bitflags;

use super::Exchange;
use super::crit::{crit_chance, crit_multiplier};
use super::damage::{DamageKind, clamp_damage, raw_damage};
use super::multipliers::{incoming, outgoing};
use crate::catalog::{PassiveEffect, WeaponEffect};
use crate::engine::Phase;
use crate::state::{Absorption, Combatant, Counter, Mark};

bitflags! {
    /// What happened to a resolved hit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HitFlags: u8 {
        const DODGED   = 1 << 0;
        const CRIT     = 1 << 1;
        const WARDED   = 1 << 2;
        const SHIELDED = 1 << 3;
        const LETHAL   = 1 << 4;
    }
}

/// Description of one incoming hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub label: &'static str,
    pub kind: DamageKind,
    pub offensive: f64,
    pub mitigating: f64,
    /// Multiplier applied to the raw value (ability scaling).
    pub scale: f64,
    pub can_crit: bool,
    /// Subject to the defender's ability ward.
    pub warded: bool,
    /// Triggers the attacker's weapon on-hit effects.
    pub procs: bool,
}

impl Hit {
    /// Attack against defense, crits and procs enabled.
    pub fn physical(label: &'static str, offensive: f64, mitigating: f64) -> Self {
        Self {
            label,
            kind: DamageKind::Physical,
            offensive,
            mitigating,
            scale: 1.0,
            can_crit: true,
            warded: false,
            procs: true,
        }
    }

    /// Capacity against resistance, crits enabled, no procs.
    pub fn magical(label: &'static str, offensive: f64, mitigating: f64) -> Self {
        Self {
            label,
            kind: DamageKind::Magical,
            offensive,
            mitigating,
            scale: 1.0,
            can_crit: true,
            warded: false,
            procs: false,
        }
    }

    /// A fixed amount that skips mitigation and crits.
    pub fn fixed(label: &'static str, amount: f64) -> Self {
        Self {
            label,
            kind: DamageKind::True,
            offensive: amount,
            mitigating: 0.0,
            scale: 1.0,
            can_crit: false,
            warded: false,
            procs: false,
        }
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale *= scale;
        self
    }

    pub fn warded(mut self, warded: bool) -> Self {
        self.warded = warded;
        self
    }

    pub fn without_crit(mut self) -> Self {
        self.can_crit = false;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub flags: HitFlags,
    /// Final damage after every multiplier; zero when dodged.
    pub damage: u32,
}

/// Resolve `hit` from `attacker` onto `defender`.
pub fn resolve_hit(
    x: &mut Exchange<'_>,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    hit: Hit,
) -> HitReport {
    let mut report = HitReport::default();
    let config = x.config;

    if defender.status.dodge.consume() {
        x.journal.note(|| {
            format!(
                "{} sidesteps {}'s {}",
                defender.name, attacker.name, hit.label
            )
        });
        x.journal.flush(Phase::Action, Some(attacker.side), attacker, defender);
        report.flags |= HitFlags::DODGED;
        return report;
    }
    if hit.kind != DamageKind::True && x.rng.chance(defender.matchup.edge.dodge_chance) {
        x.journal.note(|| {
            format!("{} evades {}'s {}", defender.name, attacker.name, hit.label)
        });
        x.journal.flush(Phase::Action, Some(attacker.side), attacker, defender);
        report.flags |= HitFlags::DODGED;
        return report;
    }

    let base = match hit.kind {
        DamageKind::True => hit.offensive,
        DamageKind::Physical | DamageKind::Magical => {
            f64::from(raw_damage(hit.offensive, hit.mitigating, &config.damage))
        }
    };
    let mut value = base * hit.scale;

    if hit.warded && attacker.matchup.ward_reduction > 0.0 {
        value *= 1.0 - attacker.matchup.ward_reduction;
        report.flags |= HitFlags::WARDED;
    }
    if hit.can_crit && x.rng.chance(crit_chance(attacker, &config.crit)) {
        value *= crit_multiplier(attacker, defender, &config.crit);
        report.flags |= HitFlags::CRIT;
    }
    value *= outgoing(attacker, defender, x.round);
    value *= incoming(defender);

    let damage = clamp_damage(value, config.damage.minimum);
    report.damage = damage;

    x.journal.note(|| {
        let mut line = format!(
            "{} hits {} with {} for {} {} damage",
            attacker.name, defender.name, hit.label, damage, hit.kind
        );
        if report.flags.contains(HitFlags::CRIT) {
            line.push_str(" (critical)");
        }
        if report.flags.contains(HitFlags::WARDED) {
            line.push_str(" (warded)");
        }
        line
    });
    let split = land(x, attacker, defender, damage, false);
    if split.shield > 0 {
        report.flags |= HitFlags::SHIELDED;
    }
    if split.hp > 0 && !defender.is_alive() {
        report.flags |= HitFlags::LETHAL;
    }

    // Fires even when the hit just killed the defender; both may fall.
    if let Some(fraction) = defender.status.reflect.take() {
        let back = clamp_damage(f64::from(damage) * fraction, config.damage.minimum);
        x.journal.note(|| format!("{} reflects {} damage", defender.name, back));
        land(x, defender, attacker, back, false);
    }

    spectral_mark(x, attacker, defender);
    if hit.procs {
        apply_procs(x, attacker, defender, damage);
    }

    report
}

/// Apply `amount` from `source` to `target` and settle the consequences.
///
/// Shield first unless `pierce`. Flushes the pending lines as one step,
/// then handles the target's lethal check and a boss shield burst. Each of
/// those can recurse at most once per one-shot charge.
pub(crate) fn land(
    x: &mut Exchange<'_>,
    source: &mut Combatant,
    target: &mut Combatant,
    amount: u32,
    pierce: bool,
) -> Absorption {
    let split = if pierce {
        Absorption {
            hp: target.lose_hp(amount),
            ..Absorption::default()
        }
    } else {
        target.absorb(amount)
    };
    let applied = u64::from(split.shield) + u64::from(split.hp);
    source.damage_dealt += applied;
    target.damage_taken += applied;
    target.status.bank += applied;

    if split.shield > 0 {
        x.journal.note(|| {
            if split.shield_broken {
                format!("{}'s shield absorbs {} and breaks", target.name, split.shield)
            } else {
                format!("{}'s shield absorbs {}", target.name, split.shield)
            }
        });
    }
    x.journal.flush(Phase::Action, Some(source.side), source, target);

    settle(x, target, source);

    if split.shield_broken && source.is_alive() && target.status.shield_burst.consume() {
        if let Some(fraction) = target.role.shield_burst() {
            let burst = clamp_damage(f64::from(target.initial_shield()) * fraction, 0);
            if burst > 0 {
                x.journal.note(|| {
                    format!(
                        "{}'s broken shield bursts, dealing {} to {}",
                        target.name, burst, source.name
                    )
                });
                land(x, target, source, burst, false);
            }
        }
    }

    split
}

/// Lethal check for `victim`: race revive, then awakening revive, otherwise
/// the victim falls.
fn settle(x: &mut Exchange<'_>, victim: &mut Combatant, other: &mut Combatant) {
    if victim.is_alive() {
        return;
    }

    if victim.status.race_revive.consume() {
        let fraction = victim.kit.race.as_ref().and_then(|r| r.revive()).unwrap_or(0.0);
        let hp = victim.restore(fraction);
        x.journal.note(|| format!("{} refuses to fall and rises with {} HP", victim.name, hp));
        x.journal.flush(Phase::Action, Some(victim.side), victim, other);
        return;
    }

    let awakening = victim.kit.awakening.as_ref().and_then(|a| a.revive);
    if let Some(revive) = awakening {
        if victim.status.awakening_revive.consume() {
            let hp = victim.restore(revive.hp_fraction);
            x.journal.note(|| format!("{}'s awakening revives them with {} HP", victim.name, hp));
            x.journal.flush(Phase::Action, Some(victim.side), victim, other);

            let blast = clamp_damage(f64::from(victim.max_hp()) * revive.explosion, 0);
            if blast > 0 && other.is_alive() {
                x.journal.note(|| {
                    format!("{} erupts, dealing {} to {}", victim.name, blast, other.name)
                });
                land(x, victim, other, blast, false);
            }
            return;
        }
    }

    x.journal.note(|| format!("{} falls", victim.name));
    x.journal.flush(Phase::Action, Some(victim.side), victim, other);
}

/// First landed hit from a spectral-mark holder marks the defender for good.
fn spectral_mark(x: &mut Exchange<'_>, attacker: &mut Combatant, defender: &mut Combatant) {
    if defender.status.spectral.is_some() || !defender.is_alive() {
        return;
    }
    if let Some(PassiveEffect::SpectralMark { bonus }) = attacker.kit.passive {
        defender.status.spectral = Some(bonus);
        x.journal.note(|| format!("{} is spectrally marked", defender.name));
        x.journal.flush(Phase::Action, Some(attacker.side), attacker, defender);
    }
}

/// Weapon on-hit effects, all computed from the same final `damage`.
fn apply_procs(
    x: &mut Exchange<'_>,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    damage: u32,
) {
    let landed = attacker.status.bump(Counter::HitsLanded);
    let effects: Vec<WeaponEffect> = attacker.kit.weapon_effects().copied().collect();

    for effect in effects {
        match effect {
            WeaponEffect::Bleed { stacks, rate } if stacks > 0 && defender.is_alive() => {
                defender
                    .status
                    .add_bleed(stacks, rate, x.config.bleed.max_stacks);
                x.journal.note(|| {
                    format!(
                        "{} bleeds ({} stacks)",
                        defender.name, defender.status.bleed.stacks
                    )
                });
            }
            WeaponEffect::StunEvery { attacks, turns }
                if attacks > 0 && landed % attacks == 0 && defender.is_alive() =>
            {
                defender.status.stun(turns);
                x.journal.note(|| format!("{} is stunned for {} turn(s)", defender.name, turns));
            }
            WeaponEffect::LifeSteal { fraction } if attacker.is_alive() => {
                let amount = (f64::from(damage) * fraction).round().max(0.0) as u32;
                let healed = attacker.heal(amount);
                if healed == 0 {
                    continue;
                }
                x.journal.note(|| format!("{} drains {} HP", attacker.name, healed));
            }
            WeaponEffect::Mark { bonus, rounds } if rounds > 0 && defender.is_alive() => {
                defender.status.mark = Some(Mark { bonus, rounds });
                x.journal.note(|| format!("{} is marked for {} round(s)", defender.name, rounds));
            }
            _ => continue,
        }
        x.journal.flush(Phase::Action, Some(attacker.side), attacker, defender);
    }
}

/// Bleed tick at round start. Bypasses the shield and may trigger a revive.
pub fn bleed_tick(x: &mut Exchange<'_>, victim: &mut Combatant, other: &mut Combatant) {
    let bleed = victim.status.bleed;
    if bleed.stacks == 0 || !victim.is_alive() {
        return;
    }
    let amount = match bleed.rate {
        Some(rate) => clamp_damage(f64::from(victim.max_hp()) * rate, 1),
        None => bleed
            .stacks
            .saturating_mul(x.config.bleed.damage_per_stack)
            .max(1),
    };
    victim.status.decay_bleed();
    x.journal.note(|| format!("{} loses {} HP to bleeding", victim.name, amount));
    land(x, other, victim, amount, true);
}
