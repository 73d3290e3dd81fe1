//! Step emitter.
//!
//! Resolution code writes lines with [`Journal::note`] and closes a step with
//! [`Journal::flush`]. A headless journal skips formatting entirely: notes
//! take closures so bulk runs never build strings they would throw away.

use sha2::{Digest, Sha256};

use super::step::{Phase, Snapshot, Step};
use crate::state::{Combatant, Side};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Journal {
    recording: bool,
    pending: Vec<String>,
    steps: Vec<Step>,
    flushed: usize,
}

impl Journal {
    /// Keeps every step.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    /// Keeps nothing; only counts steps.
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Append a line to the step being built.
    pub fn note(&mut self, line: impl FnOnce() -> String) {
        if self.recording {
            self.pending.push(line());
        }
    }

    /// Close the current step with a snapshot of both combatants.
    pub fn flush(&mut self, phase: Phase, actor: Option<Side>, a: &Combatant, b: &Combatant) {
        self.flushed += 1;
        if !self.recording {
            return;
        }
        self.steps.push(Step {
            phase,
            actor,
            lines: std::mem::take(&mut self.pending),
            snapshot: Snapshot::of(a, b),
        });
    }

    /// Steps closed so far, recorded or not.
    pub fn flushed(&self) -> usize {
        self.flushed
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// SHA-256 over the canonical byte form of a step sequence.
///
/// Equal digests mean byte-identical logs, which is how replay stability is
/// checked without comparing whole sequences.
pub fn digest(steps: &[Step]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for step in steps {
        hasher.update(step.phase.as_ref().as_bytes());
        hasher.update([match step.actor {
            None => 0u8,
            Some(Side::First) => 1,
            Some(Side::Second) => 2,
        }]);
        hasher.update((step.lines.len() as u64).to_le_bytes());
        for line in &step.lines {
            hasher.update((line.len() as u64).to_le_bytes());
            hasher.update(line.as_bytes());
        }
        for vitals in [step.snapshot.first, step.snapshot.second] {
            hasher.update(vitals.hp.to_le_bytes());
            hasher.update(vitals.max_hp.to_le_bytes());
            hasher.update(vitals.shield.to_le_bytes());
        }
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::stats::{CombatantSpec, StatRecord};

    fn pair() -> (Combatant, Combatant) {
        let catalog = Catalog::new();
        let a = CombatantSpec::new("A", StatRecord::full(50, 1, 1, 1, 1, 1));
        let b = CombatantSpec::new("B", StatRecord::full(60, 1, 1, 1, 1, 1)).shield(5);
        (
            Combatant::build(&a, Side::First, &catalog).unwrap(),
            Combatant::build(&b, Side::Second, &catalog).unwrap(),
        )
    }

    #[test]
    fn headless_skips_formatting() {
        let (a, b) = pair();
        let mut journal = Journal::headless();
        journal.note(|| unreachable!("headless journals never format"));
        journal.flush(Phase::Intro, None, &a, &b);
        assert!(journal.steps().is_empty());
        assert_eq!(journal.flushed(), 1);
    }

    #[test]
    fn snapshot_is_in_side_order() {
        let (a, b) = pair();
        let mut journal = Journal::recording();
        journal.note(|| "hello".to_string());
        journal.flush(Phase::Action, Some(Side::Second), &b, &a);

        let step = &journal.steps()[0];
        assert_eq!(step.lines, vec!["hello".to_string()]);
        assert_eq!(step.snapshot.first.max_hp, 50);
        assert_eq!(step.snapshot.second.shield, 5);
    }

    #[test]
    fn digest_tracks_content() {
        let (a, b) = pair();
        let mut one = Journal::recording();
        one.note(|| "x".to_string());
        one.flush(Phase::Intro, None, &a, &b);
        let mut two = one.clone();

        assert_eq!(digest(one.steps()), digest(two.steps()));
        two.note(|| "y".to_string());
        two.flush(Phase::Victory, Some(Side::First), &a, &b);
        assert_ne!(hex::encode(digest(one.steps())), hex::encode(digest(two.steps())));
    }
}
