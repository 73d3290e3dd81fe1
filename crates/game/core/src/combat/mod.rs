//! Combat resolution system.
//!
//! Damage, crits, multiplier stacks, shield absorption and the on-hit
//! effects that follow a landed hit.
//!
//! # Core Functions
//!
//! - `raw_damage`: `max(1, round(offensive - 0.5 × mitigating))`
//! - `crit_chance` / `crit_multiplier`: additive bonus stacks
//! - `outgoing` / `incoming`: commutative multiplier products
//! - `resolve_hit`: the full pipeline for one hit, logged step by step
//! - `bleed_tick`: round-start bleed damage

pub mod crit;
pub mod damage;
pub mod hit;
pub mod multipliers;

pub use crit::{crit_chance, crit_multiplier};
pub use damage::{DamageKind, clamp_damage, raw_damage};
pub use hit::{Hit, HitFlags, HitReport, bleed_tick, resolve_hit};
pub use multipliers::{incoming, on_period, outgoing};

use crate::config::DuelConfig;
use crate::engine::Journal;
use crate::rng::CombatRng;

/// Everything a resolution step needs besides the two combatants.
pub struct Exchange<'a> {
    /// Current round, 1-based.
    pub round: u32,
    pub config: &'a DuelConfig,
    pub rng: &'a mut dyn CombatRng,
    pub journal: &'a mut Journal,
}

impl<'a> Exchange<'a> {
    pub fn new(
        round: u32,
        config: &'a DuelConfig,
        rng: &'a mut dyn CombatRng,
        journal: &'a mut Journal,
    ) -> Self {
        Self {
            round,
            config,
            rng,
            journal,
        }
    }
}
