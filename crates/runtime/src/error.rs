//! Errors surfaced by bulk runs, replay and the balance tool.
use thiserror::Error;

use duel_core::CombatantError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid matchup")]
    Combatant(#[from] CombatantError),

    #[error("bulk simulation batch failed to join")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("replay receiver dropped after {sent} steps")]
    ReplayChannelClosed { sent: usize },

    #[error("matchup `{0}` not found")]
    UnknownMatchup(String),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
