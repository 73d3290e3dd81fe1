//! Stat shapes shared by records, catalogs and combatants.

use crate::error::CombatantError;

/// The six combat stats.
///
/// - **hp**: maximum hit points
/// - **auto**: attack, drives physical damage
/// - **def**: defense, mitigates physical damage
/// - **cap**: capacity, drives magical damage and heals
/// - **rescap**: resistance, mitigates magical damage
/// - **spd**: speed, drives turn priority
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stat {
    Hp,
    Auto,
    Def,
    Cap,
    Rescap,
    Spd,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Auto,
        Stat::Def,
        Stat::Cap,
        Stat::Rescap,
        Stat::Spd,
    ];
}

/// Raw stat record as supplied by a character or boss record.
///
/// Every field is optional because upstream records may omit them; a missing
/// field is rejected by [`StatRecord::validate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatRecord {
    pub hp: Option<i64>,
    pub auto: Option<i64>,
    pub def: Option<i64>,
    pub cap: Option<i64>,
    pub rescap: Option<i64>,
    pub spd: Option<i64>,
}

impl StatRecord {
    /// Record with every field present.
    pub fn full(hp: i64, auto: i64, def: i64, cap: i64, rescap: i64, spd: i64) -> Self {
        Self {
            hp: Some(hp),
            auto: Some(auto),
            def: Some(def),
            cap: Some(cap),
            rescap: Some(rescap),
            spd: Some(spd),
        }
    }

    pub fn get(&self, stat: Stat) -> Option<i64> {
        match stat {
            Stat::Hp => self.hp,
            Stat::Auto => self.auto,
            Stat::Def => self.def,
            Stat::Cap => self.cap,
            Stat::Rescap => self.rescap,
            Stat::Spd => self.spd,
        }
    }

    /// Checks presence and sign of every field and returns the raw block.
    pub fn validate(&self, combatant: &str) -> Result<StatBlock, CombatantError> {
        let mut block = StatBlock::default();
        for stat in Stat::ALL {
            let value = self.get(stat).ok_or_else(|| CombatantError::MissingStat {
                combatant: combatant.to_owned(),
                stat,
            })?;
            if value < 0 {
                return Err(CombatantError::NegativeStat {
                    combatant: combatant.to_owned(),
                    stat,
                    value,
                });
            }
            block.set(stat, value);
        }
        Ok(block)
    }
}

/// Working stat values during composition. May go negative between layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub hp: i64,
    pub auto: i64,
    pub def: i64,
    pub cap: i64,
    pub rescap: i64,
    pub spd: i64,
}

impl StatBlock {
    pub fn new(hp: i64, auto: i64, def: i64, cap: i64, rescap: i64, spd: i64) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    pub fn get(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Auto => self.auto,
            Stat::Def => self.def,
            Stat::Cap => self.cap,
            Stat::Rescap => self.rescap,
            Stat::Spd => self.spd,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i64) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Auto => self.auto = value,
            Stat::Def => self.def = value,
            Stat::Cap => self.cap = value,
            Stat::Rescap => self.rescap = value,
            Stat::Spd => self.spd = value,
        }
    }

    /// Returns a new block with `f(stat, value)` applied to every stat.
    pub fn map(self, f: impl Fn(Stat, i64) -> i64) -> Self {
        let mut out = self;
        for stat in Stat::ALL {
            out.set(stat, f(stat, self.get(stat)));
        }
        out
    }
}

/// Signed flat additions per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatDelta {
    pub hp: i32,
    pub auto: i32,
    pub def: i32,
    pub cap: i32,
    pub rescap: i32,
    pub spd: i32,
}

impl StatDelta {
    pub fn new(hp: i32, auto: i32, def: i32, cap: i32, rescap: i32, spd: i32) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Auto => self.auto,
            Stat::Def => self.def,
            Stat::Cap => self.cap,
            Stat::Rescap => self.rescap,
            Stat::Spd => self.spd,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Integer percentage per stat (`10` = +10%, `-20` = −20%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatScale {
    pub hp: i32,
    pub auto: i32,
    pub def: i32,
    pub cap: i32,
    pub rescap: i32,
    pub spd: i32,
}

impl StatScale {
    /// The same percentage on every stat.
    pub fn uniform(percent: i32) -> Self {
        Self {
            hp: percent,
            auto: percent,
            def: percent,
            cap: percent,
            rescap: percent,
            spd: percent,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Auto => self.auto,
            Stat::Def => self.def,
            Stat::Cap => self.cap,
            Stat::Rescap => self.rescap,
            Stat::Spd => self.spd,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Adds `percent`% of the current `from` stat to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conversion {
    pub from: Stat,
    pub to: Stat,
    pub percent: i32,
}

/// Composed, non-negative stats stored on a combatant for a whole match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub auto: u32,
    pub def: u32,
    pub cap: u32,
    pub rescap: u32,
    pub spd: u32,
}

impl BaseStats {
    pub fn new(hp: u32, auto: u32, def: u32, cap: u32, rescap: u32, spd: u32) -> Self {
        Self {
            hp,
            auto,
            def,
            cap,
            rescap,
            spd,
        }
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Auto => self.auto,
            Stat::Def => self.def,
            Stat::Cap => self.cap,
            Stat::Rescap => self.rescap,
            Stat::Spd => self.spd,
        }
    }
}

impl From<StatBlock> for BaseStats {
    /// Clamps every stat into `[0, u32::MAX]`.
    fn from(block: StatBlock) -> Self {
        let clamp = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
        Self {
            hp: clamp(block.hp),
            auto: clamp(block.auto),
            def: clamp(block.def),
            cap: clamp(block.cap),
            rescap: clamp(block.rescap),
            spd: clamp(block.spd),
        }
    }
}
