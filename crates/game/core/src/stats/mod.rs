//! Stat System - composition pipeline.
//!
//! A combatant's effective stats are computed exactly once, at match start,
//! by folding an ordered list of pure layers over the raw per-level record:
//!
//! ```text
//! [ Raw record ] → + Race flat → + Class flat → + Allocation flat
//!      → + Weapon flat → Weapon conversions
//!      → (awakened?) − Race flat, + Awakening flat → Awakening %
//!      → Passive % → Upgrade %
//!      → Clamp ≥ 0
//! ```
//!
//! Every layer takes and returns the same [`StatBlock`] shape, so the
//! pipeline can be reordered and each layer tested in isolation. Temporary
//! combat modifiers never re-run this pipeline; they live in
//! [`crate::state::StatusFlags`].

pub mod block;
pub mod compose;
pub mod pipeline;
pub mod spec;

pub use block::{BaseStats, Conversion, Stat, StatBlock, StatDelta, StatRecord, StatScale};
pub use compose::{Composition, compose};
pub use pipeline::{Layer, LayerSource, Pipeline};
pub use spec::{CombatantSpec, PassiveSlot};
