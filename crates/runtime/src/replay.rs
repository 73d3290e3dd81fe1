//! Paced playback of a recorded step log.
//!
//! The engine computes the whole log up front; pacing only decides how long
//! the consumer waits between steps.

use std::time::Duration;

use duel_core::{Phase, Step};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Result, RuntimeError};

/// Delay after each step, per phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayPacing {
    pub intro: Duration,
    pub turn_start: Duration,
    pub action: Duration,
    pub victory: Duration,
}

impl Default for ReplayPacing {
    fn default() -> Self {
        Self {
            intro: Duration::from_millis(1_200),
            turn_start: Duration::from_millis(400),
            action: Duration::from_millis(800),
            victory: Duration::ZERO,
        }
    }
}

impl ReplayPacing {
    /// No waiting at all.
    pub const fn instant() -> Self {
        Self {
            intro: Duration::ZERO,
            turn_start: Duration::ZERO,
            action: Duration::ZERO,
            victory: Duration::ZERO,
        }
    }

    pub fn delay(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Intro => self.intro,
            Phase::TurnStart => self.turn_start,
            Phase::Action => self.action,
            Phase::Victory => self.victory,
        }
    }
}

/// Forward every step to `tx`, waiting the phase delay between steps.
///
/// Returns the number of steps sent.
///
/// # Errors
///
/// [`RuntimeError::ReplayChannelClosed`] when the receiver is dropped early.
pub async fn replay_paced(
    steps: Vec<Step>,
    pacing: ReplayPacing,
    tx: mpsc::Sender<Step>,
) -> Result<usize> {
    let total = steps.len();
    for (sent, step) in steps.into_iter().enumerate() {
        let delay = pacing.delay(step.phase);
        if tx.send(step).await.is_err() {
            debug!(sent, total, "replay receiver dropped");
            return Err(RuntimeError::ReplayChannelClosed { sent });
        }
        if sent + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{Side, Snapshot};

    fn step(phase: Phase, line: &str) -> Step {
        Step {
            phase,
            actor: Some(Side::First),
            lines: vec![line.to_string()],
            snapshot: Snapshot::default(),
        }
    }

    #[tokio::test]
    async fn forwards_steps_in_order() {
        let steps = vec![
            step(Phase::Intro, "intro"),
            step(Phase::Action, "hit"),
            step(Phase::Victory, "win"),
        ];
        let (tx, mut rx) = mpsc::channel(8);
        let sent = replay_paced(steps.clone(), ReplayPacing::instant(), tx)
            .await
            .unwrap();
        assert_eq!(sent, 3);

        let mut received = Vec::new();
        while let Some(step) = rx.recv().await {
            received.push(step);
        }
        assert_eq!(received, steps);
    }

    #[tokio::test]
    async fn dropped_receiver_stops_replay() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let err = replay_paced(vec![step(Phase::Intro, "intro")], ReplayPacing::instant(), tx)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ReplayChannelClosed { sent: 0 }));
    }

    #[test]
    fn delays_follow_phase() {
        let pacing = ReplayPacing::default();
        assert_eq!(pacing.delay(Phase::Action), Duration::from_millis(800));
        assert_eq!(ReplayPacing::instant().delay(Phase::Intro), Duration::ZERO);
    }
}
