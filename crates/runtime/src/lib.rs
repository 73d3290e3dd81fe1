//! Async orchestration around the synchronous duel engine.
//!
//! The engine resolves one match at a time without ever awaiting. This crate
//! adds the parts that do:
//! - [`bulk`] runs many independent matches on the blocking pool and merges
//!   their tallies
//! - [`replay`] paces an already computed step log for animated playback
//! - [`settings`] and [`logging`] carry the balance tool's ambient setup
pub mod bulk;
pub mod error;
pub mod logging;
pub mod replay;
pub mod settings;

pub use bulk::{BulkReport, BulkRequest, BulkSimulator, CancelToken, DamageStats};
pub use error::{Result, RuntimeError};
pub use replay::{ReplayPacing, replay_paced};
pub use settings::BalanceSettings;
