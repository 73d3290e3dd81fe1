//! Deterministic duel resolution shared by game servers and balance tools.
//!
//! `duel-core` takes two fully-specified combatant records, composes their
//! effective stats, and resolves a round-by-round duel into a replayable
//! [`Step`] log plus a winner. It performs no I/O and keeps no state between
//! matches: every call to [`engine::DuelEngine`] starts from freshly composed
//! combatants, so bulk re-simulation can run matches in parallel.
//!
//! The crate is layered leaves-first:
//!
//! - [`stats`]: stat records and the composition pipeline
//! - [`catalog`]: static race/class/weapon/passive/awakening tables
//! - [`state`]: per-match combatant state (cooldowns, shield, statuses)
//! - [`combat`]: damage, crits, multiplier stacks, shield absorption
//! - [`ability`]: per-class signature abilities and basic attacks
//! - [`engine`]: turn order, step journal, and the match driver
pub mod ability;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;
pub mod stats;

pub use ability::{AbilityKey, AbilityKind};
pub use catalog::{
    AwakeningDef, Catalog, CatalogOracle, ClassDef, PassiveDef, PassiveEffect, RaceDef, RaceTrait,
    WeaponDef, WeaponEffect,
};
pub use config::DuelConfig;
pub use engine::{
    DamageHistogram, DrawReason, DuelEngine, MatchKind, MatchResult, MatchSummary, Outcome, Phase,
    Snapshot, Step, Tally, Vitals,
};
pub use error::{CombatantError, ErrorSeverity, GameError};
pub use rng::{CombatRng, PcgRng, ScriptedRng, compute_seed};
pub use state::{BossTraits, Combatant, Role, Side};
pub use stats::{BaseStats, CombatantSpec, PassiveSlot, Stat, StatDelta, StatRecord, StatScale};
