//! Simulation driver.
//!
//! The [`DuelEngine`] owns the outer loop of a match:
//!
//! ```text
//! intro → { turn start → bleed → order → leader acts → trailer acts } → victory
//! ```
//!
//! It runs in two modes over the same code path. [`DuelEngine::run`] keeps
//! the full step log for replay; [`DuelEngine::simulate`] keeps nothing but a
//! [`MatchSummary`] for bulk aggregation. Both build fresh combatants on
//! every call, so nothing leaks between matches.
mod journal;
mod step;
mod summary;
mod turns;

pub use journal::{Journal, digest};
pub use step::{Phase, Snapshot, Step, Vitals};
pub use summary::{DamageHistogram, DrawReason, MatchSummary, Outcome, Tally};
pub use turns::{TurnOrder, priority, turn_order};

use crate::ability::take_action;
use crate::catalog::CatalogOracle;
use crate::combat::{Exchange, bleed_tick};
use crate::config::DuelConfig;
use crate::error::CombatantError;
use crate::rng::CombatRng;
use crate::state::{Combatant, Side};
use crate::stats::CombatantSpec;

/// Kind of match, which decides the round cap and cap resolution.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MatchKind {
    /// Player vs player. Draw at the cap.
    #[default]
    Standard,
    /// Player vs boss. Extinction of the non-boss side at the cap.
    Boss,
    /// Player vs dummy. Draw at the cap; the summary carries the damage.
    DamageTest,
}

impl MatchKind {
    pub fn round_cap(&self, config: &DuelConfig) -> u32 {
        match self {
            MatchKind::Standard => config.rounds.standard,
            MatchKind::Boss => config.rounds.boss,
            MatchKind::DamageTest => config.rounds.damage_test,
        }
    }
}

/// A recorded match: the replay log plus its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub steps: Vec<Step>,
    pub winner: Option<Side>,
    pub rounds: u32,
    pub summary: MatchSummary,
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        self.summary.outcome
    }

    /// SHA-256 of the step log.
    pub fn digest(&self) -> [u8; 32] {
        digest(&self.steps)
    }
}

/// Resolves matches against a shared config and catalog.
#[derive(Clone, Copy)]
pub struct DuelEngine<'a> {
    config: &'a DuelConfig,
    catalog: &'a dyn CatalogOracle,
}

impl<'a> DuelEngine<'a> {
    pub fn new(config: &'a DuelConfig, catalog: &'a dyn CatalogOracle) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &DuelConfig {
        self.config
    }

    /// Build both combatants and fix their opponent-dependent modifiers.
    ///
    /// # Errors
    ///
    /// Fails before any state is built when either record is invalid or a
    /// boss match does not have exactly one boss.
    pub fn prepare(
        &self,
        first: &CombatantSpec,
        second: &CombatantSpec,
        kind: MatchKind,
    ) -> Result<(Combatant, Combatant), CombatantError> {
        if kind == MatchKind::Boss {
            let found = [first, second]
                .iter()
                .filter(|spec| spec.role.is_boss())
                .count();
            if found != 1 {
                return Err(CombatantError::BossCount { found });
            }
        }

        let mut a = Combatant::build(first, Side::First, self.catalog)?;
        let mut b = Combatant::build(second, Side::Second, self.catalog)?;
        a.prepare_against(&b, self.config);
        b.prepare_against(&a, self.config);
        Ok((a, b))
    }

    /// Run one match and keep the full step log.
    pub fn run(
        &self,
        first: &CombatantSpec,
        second: &CombatantSpec,
        kind: MatchKind,
        rng: &mut dyn CombatRng,
    ) -> Result<MatchResult, CombatantError> {
        let (mut a, mut b) = self.prepare(first, second, kind)?;
        let mut journal = Journal::recording();
        let summary = self.play(&mut a, &mut b, kind, rng, &mut journal);
        Ok(MatchResult {
            steps: journal.into_steps(),
            winner: summary.winner(),
            rounds: summary.rounds,
            summary,
        })
    }

    /// Run one match without materializing the step log.
    pub fn simulate(
        &self,
        first: &CombatantSpec,
        second: &CombatantSpec,
        kind: MatchKind,
        rng: &mut dyn CombatRng,
    ) -> Result<MatchSummary, CombatantError> {
        let (mut a, mut b) = self.prepare(first, second, kind)?;
        let mut journal = Journal::headless();
        Ok(self.play(&mut a, &mut b, kind, rng, &mut journal))
    }

    /// Drive prepared combatants to a terminal outcome.
    pub fn play(
        &self,
        a: &mut Combatant,
        b: &mut Combatant,
        kind: MatchKind,
        rng: &mut dyn CombatRng,
        journal: &mut Journal,
    ) -> MatchSummary {
        let cap = kind.round_cap(self.config);
        intro(journal, a, b, kind);

        let mut rounds = 0;
        let mut outcome = None;
        while rounds < cap {
            rounds += 1;
            let mut x = Exchange::new(rounds, self.config, &mut *rng, &mut *journal);

            a.status.tick_mark();
            b.status.tick_mark();
            x.journal.note(|| format!("Round {rounds}"));
            x.journal.flush(Phase::TurnStart, None, a, b);

            bleed_tick(&mut x, a, b);
            bleed_tick(&mut x, b, a);
            outcome = decide(a, b);
            if outcome.is_some() {
                break;
            }

            let order = turn_order(a, b, rounds, x.rng);
            let (leader, trailer) = match order.leader {
                Side::First => (&mut *a, &mut *b),
                Side::Second => (&mut *b, &mut *a),
            };

            take_action(&mut x, leader, trailer);
            outcome = decide(leader, trailer);
            if outcome.is_some() {
                break;
            }
            take_action(&mut x, trailer, leader);
            outcome = decide(leader, trailer);
            if outcome.is_some() {
                break;
            }
        }

        let outcome = outcome.unwrap_or_else(|| at_cap(journal, a, b, kind));
        victory(journal, a, b, outcome, rounds);

        let (first, second) = match a.side {
            Side::First => (&*a, &*b),
            Side::Second => (&*b, &*a),
        };
        MatchSummary {
            outcome,
            rounds,
            damage_dealt: [first.damage_dealt, second.damage_dealt],
            hp_left: [first.hp(), second.hp()],
        }
    }
}

fn intro(journal: &mut Journal, a: &Combatant, b: &Combatant, kind: MatchKind) {
    journal.note(|| format!("{} match: {} vs {}", kind, describe(a), describe(b)));
    for combatant in [a, b] {
        for note in &combatant.notes {
            journal.note(|| format!("{}: {}", combatant.name, note));
        }
        if combatant.shield() > 0 {
            journal.note(|| format!("{} starts with a {} shield", combatant.name, combatant.shield()));
        }
    }
    journal.flush(Phase::Intro, None, a, b);
}

fn describe(combatant: &Combatant) -> String {
    let race = combatant.kit.race.as_ref().map(|r| r.name.as_str());
    let class = combatant.kit.class.as_ref().map(|c| c.name.as_str());
    match (race, class) {
        (Some(race), Some(class)) => {
            format!("{} (lv {} {race} {class})", combatant.name, combatant.level)
        }
        (Some(only), None) | (None, Some(only)) => {
            format!("{} (lv {} {only})", combatant.name, combatant.level)
        }
        (None, None) => format!("{} (lv {})", combatant.name, combatant.level),
    }
}

/// Terminal check after any HP-changing phase.
fn decide(a: &Combatant, b: &Combatant) -> Option<Outcome> {
    match (a.is_alive(), b.is_alive()) {
        (true, true) => None,
        (false, false) => Some(Outcome::Draw(DrawReason::MutualDestruction)),
        (true, false) => Some(Outcome::Victory { winner: a.side }),
        (false, true) => Some(Outcome::Victory { winner: b.side }),
    }
}

/// Resolve a match that reached its round cap with both sides alive.
fn at_cap(journal: &mut Journal, a: &mut Combatant, b: &mut Combatant, kind: MatchKind) -> Outcome {
    if kind == MatchKind::Boss {
        let (boss, doomed) = if a.role.is_boss() {
            (&mut *a, &mut *b)
        } else {
            (&mut *b, &mut *a)
        };
        doomed.extinguish();
        journal.note(|| format!("{} is overwhelmed by {}: extinction", doomed.name, boss.name));
        journal.flush(Phase::Action, Some(boss.side), boss, doomed);
        return Outcome::Extinction { boss: boss.side };
    }
    Outcome::Draw(DrawReason::Timeout)
}

fn victory(journal: &mut Journal, a: &Combatant, b: &Combatant, outcome: Outcome, rounds: u32) {
    let name = |side: Side| if a.side == side { &a.name } else { &b.name };
    journal.note(|| match outcome {
        Outcome::Victory { winner } => format!("{} wins after {rounds} rounds", name(winner)),
        Outcome::Extinction { boss } => format!("{} wins by extinction after {rounds} rounds", name(boss)),
        Outcome::Draw(DrawReason::Timeout) => format!("Draw: round cap of {rounds} reached"),
        Outcome::Draw(DrawReason::MutualDestruction) => {
            format!("Draw: both sides fell in round {rounds}")
        }
    });
    journal.flush(Phase::Victory, outcome.winner(), a, b);
}
