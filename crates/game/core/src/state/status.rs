use std::collections::BTreeMap;

use super::charge::Charge;

/// Named counters used by proc-based weapon effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Counter {
    /// Basic attacks resolved (feeds pet growth).
    BasicAttacks,
    /// Weapon hits that landed (feeds stun procs).
    HitsLanded,
    /// Magical ability casts resolved (feeds cast echo).
    CastsLanded,
}

/// Active bleed on a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bleed {
    pub stacks: u32,
    /// Fraction of max HP per tick; replaces per-stack damage when present.
    pub rate: Option<f64>,
}

/// A rounds-limited mark placed by the opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark {
    pub bonus: f64,
    pub rounds: u32,
}

/// Transient per-match combat state.
///
/// Zero-initialized at match start except for the one-shot charges, which
/// are armed from the combatant's kit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags {
    pub stunned_turns: u32,
    pub bleed: Bleed,
    pub dodge: Charge,
    /// Fraction of the next mitigated hit returned to the attacker.
    pub reflect: Option<f64>,
    /// Incoming bonus once spectrally marked. Never removed.
    pub spectral: Option<f64>,
    pub mark: Option<Mark>,
    pub race_revive: Charge,
    pub awakening_revive: Charge,
    pub shield_burst: Charge,
    /// Incoming hits still reduced by the awakening guard.
    pub guard_hits: u32,
    /// Damage received since the last retribution.
    pub bank: u64,
    pub(crate) counters: BTreeMap<Counter, u32>,
}

impl StatusFlags {
    pub fn counter(&self, counter: Counter) -> u32 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    /// Increment a counter and return its new value.
    pub fn bump(&mut self, counter: Counter) -> u32 {
        let value = self.counters.entry(counter).or_insert(0);
        *value = value.saturating_add(1);
        *value
    }

    /// Add bleed stacks, capped at `max_stacks`. A rate-based bleed keeps the
    /// highest rate seen.
    pub fn add_bleed(&mut self, stacks: u32, rate: Option<f64>, max_stacks: u32) {
        self.bleed.stacks = self.bleed.stacks.saturating_add(stacks).min(max_stacks);
        self.bleed.rate = match (self.bleed.rate, rate) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Remove one stack after a tick; clears the rate with the last stack.
    pub fn decay_bleed(&mut self) {
        self.bleed.stacks = self.bleed.stacks.saturating_sub(1);
        if self.bleed.stacks == 0 {
            self.bleed.rate = None;
        }
    }

    /// Count down the mark at round start, dropping it when expired.
    pub fn tick_mark(&mut self) {
        if let Some(mark) = self.mark.as_mut() {
            mark.rounds = mark.rounds.saturating_sub(1);
            if mark.rounds == 0 {
                self.mark = None;
            }
        }
    }

    /// Stun for `turns`, never shortening an existing stun.
    pub fn stun(&mut self, turns: u32) {
        self.stunned_turns = self.stunned_turns.max(turns);
    }
}
