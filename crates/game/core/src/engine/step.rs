use crate::state::{Combatant, Side};

/// Which part of the match a step belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Intro,
    TurnStart,
    Action,
    Victory,
}

/// HP and shield of one combatant at the end of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub shield: u32,
}

/// Vitals of both sides, always in side order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub first: Vitals,
    pub second: Vitals,
}

impl Snapshot {
    /// Snapshot of a pair given in either order.
    pub fn of(a: &Combatant, b: &Combatant) -> Self {
        let (first, second) = match a.side {
            Side::First => (a, b),
            Side::Second => (b, a),
        };
        Self {
            first: first.vitals(),
            second: second.vitals(),
        }
    }

    pub fn get(&self, side: Side) -> Vitals {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }
}

/// One immutable unit of the replay log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub phase: Phase,
    pub actor: Option<Side>,
    /// Causally ordered log lines.
    pub lines: Vec<String>,
    pub snapshot: Snapshot,
}
