use super::charge::Charge;
use super::cooldown::Cooldowns;
use super::kit::Kit;
use super::status::StatusFlags;
use super::{Role, Side};
use crate::catalog::{CatalogOracle, PassiveEffect, SpeedDuel};
use crate::config::DuelConfig;
use crate::engine::Vitals;
use crate::error::CombatantError;
use crate::stats::{BaseStats, CombatantSpec, compose};

/// Modifiers that depend on who the opponent is, fixed at match start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Matchup {
    /// Speed-duel bonuses that apply against this opponent.
    pub edge: SpeedDuel,
    /// Raw damage reduction on multi-round abilities used against a warded
    /// opponent.
    pub ward_reduction: f64,
}

/// Split of a hit between shield and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absorption {
    pub shield: u32,
    pub hp: u32,
    /// The shield was positive before the hit and is exactly zero after it.
    pub shield_broken: bool,
}

/// One side of a match.
///
/// Constructed once per match by [`Combatant::build`], mutated in place and
/// discarded afterward. `hp` stays within `[0, max_hp]` and `shield` only
/// decreases.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub side: Side,
    pub role: Role,
    pub level: u32,
    pub stats: BaseStats,
    pub kit: Kit,
    pub cooldowns: Cooldowns,
    pub status: StatusFlags,
    pub matchup: Matchup,
    /// Notes gathered during composition, surfaced in the intro step.
    pub notes: Vec<String>,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    hp: u32,
    shield: u32,
    initial_shield: u32,
}

impl Combatant {
    /// Compose stats and zero-initialize transient state.
    pub fn build(
        spec: &CombatantSpec,
        side: Side,
        catalog: &(impl CatalogOracle + ?Sized),
    ) -> Result<Self, CombatantError> {
        let composition = compose(spec, catalog)?;
        let stats = composition.stats;
        let kit = composition.kit;

        let bulwark = match kit.passive {
            Some(PassiveEffect::Bulwark { shield_fraction }) => {
                (f64::from(stats.hp) * shield_fraction).round().max(0.0) as u32
            }
            _ => 0,
        };
        let shield = spec.shield.saturating_add(bulwark);

        let status = StatusFlags {
            race_revive: Charge::armed_if(kit.race.as_ref().is_some_and(|r| r.revive().is_some())),
            awakening_revive: Charge::armed_if(
                kit.awakening.as_ref().is_some_and(|a| a.revive.is_some()),
            ),
            shield_burst: Charge::armed_if(spec.role.shield_burst().is_some() && shield > 0),
            guard_hits: kit.awakening.as_ref().and_then(|a| a.guard).map_or(0, |g| g.hits),
            ..StatusFlags::default()
        };

        Ok(Self {
            name: spec.name.clone(),
            side,
            role: spec.role,
            level: spec.level,
            stats,
            kit,
            cooldowns: Cooldowns::new(),
            status,
            matchup: Matchup::default(),
            notes: composition.notes,
            damage_dealt: 0,
            damage_taken: 0,
            hp: stats.hp,
            shield,
            initial_shield: shield,
        })
    }

    /// Fix opponent-dependent modifiers and the effective cooldown period.
    ///
    /// A warded opponent extends every multi-round ability by its extra
    /// period and shaves its raw damage.
    pub fn prepare_against(&mut self, opponent: &Combatant, config: &DuelConfig) {
        self.matchup.edge = self
            .kit
            .race
            .as_ref()
            .and_then(|race| race.speed_duel())
            .map(|duel| duel.edge(self.stats.spd, opponent.stats.spd))
            .unwrap_or_default();

        let Some(ability) = self.kit.ability() else {
            return;
        };
        let key = ability.key();
        let mut period = config.period(key);
        if period > 1 {
            if let Some((extra, reduction)) =
                opponent.kit.race.as_ref().and_then(|race| race.ability_ward())
            {
                period += extra;
                self.matchup.ward_reduction = reduction.clamp(0.0, 1.0);
            }
        }
        self.cooldowns.insert(key, period);
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn initial_shield(&self) -> u32 {
        self.initial_shield
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp() - self.hp
    }

    /// Current HP as a fraction of max HP.
    pub fn hp_fraction(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp())
    }

    /// Capacity including the speed-duel bonus.
    pub fn effective_cap(&self) -> f64 {
        f64::from(self.stats.cap) * (1.0 + self.matchup.edge.cap_bonus)
    }

    /// Take a hit: shield first, remainder to HP.
    pub fn absorb(&mut self, amount: u32) -> Absorption {
        let shield_before = self.shield;
        let to_shield = amount.min(self.shield);
        self.shield -= to_shield;
        let to_hp = self.lose_hp(amount - to_shield);
        Absorption {
            shield: to_shield,
            hp: to_hp,
            shield_broken: shield_before > 0 && self.shield == 0,
        }
    }

    /// Lose HP directly, bypassing the shield. Returns HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Heal up to max HP. Returns HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.missing_hp());
        self.hp += healed;
        healed
    }

    /// Set HP to `fraction` of max, at least 1. Used by revives.
    pub fn restore(&mut self, fraction: f64) -> u32 {
        let target = (f64::from(self.max_hp()) * fraction).round() as u32;
        self.hp = target.clamp(1, self.max_hp());
        self.hp
    }

    /// Scripted forced defeat.
    pub fn extinguish(&mut self) {
        self.hp = 0;
    }

    pub fn vitals(&self) -> Vitals {
        Vitals {
            hp: self.hp,
            max_hp: self.max_hp(),
            shield: self.shield,
        }
    }
}
