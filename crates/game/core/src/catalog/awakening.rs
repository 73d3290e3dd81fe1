use crate::stats::{StatDelta, StatScale};

/// Racial awakening, unlocked at `level`.
///
/// When active, its `flat` bonus supersedes the plain race flat bonus and its
/// `scale` is applied on top of the composed stats. The remaining fields
/// become per-match combat modifiers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwakeningDef {
    pub race: String,
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: StatScale,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_damage: f64,
    /// Multiplier on every incoming hit (`1.0` = unchanged).
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub damage_taken: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub high_hp: Option<HighHpBonus>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard: Option<AwakeningGuard>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub revive: Option<AwakeningRevive>,
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> f64 {
    1.0
}

/// Outgoing damage × `(1 + bonus)` while HP is at or above `threshold`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighHpBonus {
    pub threshold: f64,
    pub bonus: f64,
}

/// The first `hits` incoming hits are multiplied by `multiplier`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwakeningGuard {
    pub hits: u32,
    pub multiplier: f64,
}

/// Survive the first lethal hit at `hp_fraction` of max HP and deal
/// `explosion` of max HP to the opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwakeningRevive {
    pub hp_fraction: f64,
    pub explosion: f64,
}

impl AwakeningDef {
    pub fn new(race: impl Into<String>, level: u32) -> Self {
        Self {
            race: race.into(),
            level,
            flat: StatDelta::default(),
            scale: StatScale::default(),
            crit_chance: 0.0,
            crit_damage: 0.0,
            damage_taken: 1.0,
            high_hp: None,
            guard: None,
            revive: None,
        }
    }

    pub fn flat(mut self, flat: StatDelta) -> Self {
        self.flat = flat;
        self
    }

    pub fn scale(mut self, scale: StatScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn revive(mut self, hp_fraction: f64, explosion: f64) -> Self {
        self.revive = Some(AwakeningRevive {
            hp_fraction,
            explosion,
        });
        self
    }

    pub fn guard(mut self, hits: u32, multiplier: f64) -> Self {
        self.guard = Some(AwakeningGuard { hits, multiplier });
        self
    }

    pub fn high_hp(mut self, threshold: f64, bonus: f64) -> Self {
        self.high_hp = Some(HighHpBonus { threshold, bonus });
        self
    }

    pub fn unlocked_at(&self, level: u32) -> bool {
        level >= self.level
    }
}
