use crate::stats::StatScale;

/// Leveled passive. `levels[n]` is the effect at level `n + 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveDef {
    pub id: String,
    pub name: String,
    pub levels: Vec<PassiveEffect>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveEffect {
    /// Percentage layer applied during composition.
    StatBoost(StatScale),

    /// `+amount` priority on favoured rounds, `-amount` on the others.
    Tempo { favours_odd: bool, amount: i32 },

    /// `bonus` priority on rounds that are multiples of `period`.
    Initiative { period: u32, bonus: i32 },

    /// Outgoing damage × `(1 + bonus)` on rounds that are multiples of `period`.
    Surge { period: u32, bonus: f64 },

    /// Outgoing damage × `(1 + bonus)` for the first `rounds` rounds.
    OpeningAura { rounds: u32, bonus: f64 },

    /// Starting shield of `shield_fraction` of max HP.
    Bulwark { shield_fraction: f64 },

    /// Shrinks the bonus part of incoming crits:
    /// `1 + (multiplier - 1) × (1 - reduction)`.
    CritWard { reduction: f64 },

    /// First landed hit marks the target; every later hit it takes deals
    /// `(1 + bonus)`.
    SpectralMark { bonus: f64 },
}

impl PassiveDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, levels: Vec<PassiveEffect>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            levels,
        }
    }

    /// Effect at a 1-based level. Levels past the table use the top entry.
    pub fn at_level(&self, level: u32) -> Option<PassiveEffect> {
        if level == 0 {
            return None;
        }
        let index = (level as usize - 1).min(self.levels.len().checked_sub(1)?);
        self.levels.get(index).copied()
    }
}
