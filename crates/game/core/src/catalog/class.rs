use crate::ability::AbilityKind;
use crate::stats::StatDelta;

/// Class definition: flat stat bonus, crit bonus and signature ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flat: StatDelta,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    pub ability: AbilityKind,
}

impl ClassDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, ability: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flat: StatDelta::default(),
            crit_chance: 0.0,
            ability,
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
}
