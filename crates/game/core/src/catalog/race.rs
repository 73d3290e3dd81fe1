use crate::stats::StatDelta;

/// Race definition: flat stat bonus, crit bonus and combat traits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Vec<RaceTrait>,
}

/// Combat behavior granted by a race.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceTrait {
    /// Survive the first lethal hit at `hp_fraction` of max HP.
    Revive { hp_fraction: f64 },

    /// Outgoing damage × `(1 + bonus)` while HP is below `threshold` of max.
    LowHpFury { threshold: f64, bonus: f64 },

    /// Bonuses decided by comparing speed with the opponent.
    SpeedDuel(SpeedDuel),

    /// Multi-round abilities used against this race take `extra_period`
    /// more rounds to come up and deal `damage_reduction` less raw damage.
    AbilityWard { extra_period: u32, damage_reduction: f64 },

    /// Shrinks the bonus part of incoming crits:
    /// `1 + (multiplier - 1) × (1 - reduction)`.
    CritWard { reduction: f64 },
}

/// Speed-comparison bonuses.
///
/// Faster than the target grants the crit side, slower grants the dodge and
/// capacity side, and an exact tie grants half of both.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedDuel {
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub dodge_chance: f64,
    /// Fractional capacity bonus (`0.1` = +10% cap).
    pub cap_bonus: f64,
}

impl SpeedDuel {
    /// Bonuses that actually apply for `own` speed against `other`.
    pub fn edge(&self, own: u32, other: u32) -> SpeedDuel {
        use std::cmp::Ordering;

        match own.cmp(&other) {
            Ordering::Greater => SpeedDuel {
                crit_chance: self.crit_chance,
                crit_damage: self.crit_damage,
                ..SpeedDuel::default()
            },
            Ordering::Less => SpeedDuel {
                dodge_chance: self.dodge_chance,
                cap_bonus: self.cap_bonus,
                ..SpeedDuel::default()
            },
            Ordering::Equal => SpeedDuel {
                crit_chance: self.crit_chance / 2.0,
                crit_damage: self.crit_damage / 2.0,
                dodge_chance: self.dodge_chance / 2.0,
                cap_bonus: self.cap_bonus / 2.0,
            },
        }
    }
}

impl RaceDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flat: StatDelta::default(),
            crit_chance: 0.0,
            traits: Vec::new(),
        }
    }

    pub fn flat(mut self, flat: StatDelta) -> Self {
        self.flat = flat;
        self
    }

    pub fn crit_chance(mut self, crit_chance: f64) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    pub fn with_trait(mut self, race_trait: RaceTrait) -> Self {
        self.traits.push(race_trait);
        self
    }

    pub fn revive(&self) -> Option<f64> {
        self.traits.iter().find_map(|t| match t {
            RaceTrait::Revive { hp_fraction } => Some(*hp_fraction),
            _ => None,
        })
    }

    /// `(threshold, bonus)` of the low-HP fury trait.
    pub fn low_hp_fury(&self) -> Option<(f64, f64)> {
        self.traits.iter().find_map(|t| match t {
            RaceTrait::LowHpFury { threshold, bonus } => Some((*threshold, *bonus)),
            _ => None,
        })
    }

    pub fn speed_duel(&self) -> Option<SpeedDuel> {
        self.traits.iter().find_map(|t| match t {
            RaceTrait::SpeedDuel(duel) => Some(*duel),
            _ => None,
        })
    }

    /// `(extra_period, damage_reduction)` of the ability ward trait.
    pub fn ability_ward(&self) -> Option<(u32, f64)> {
        self.traits.iter().find_map(|t| match t {
            RaceTrait::AbilityWard {
                extra_period,
                damage_reduction,
            } => Some((*extra_period, *damage_reduction)),
            _ => None,
        })
    }

    pub fn crit_ward(&self) -> f64 {
        self.traits
            .iter()
            .map(|t| match t {
                RaceTrait::CritWard { reduction } => *reduction,
                _ => 0.0,
            })
            .sum()
    }
}
