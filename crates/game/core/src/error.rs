//! Common error infrastructure for duel-core.
//!
//! Only caller programming errors surface here. Runtime combat conditions
//! (unknown catalog ids, unlucky rolls, round-cap exhaustion) are resolved by
//! the component that detects them and recorded in the step log instead.
//!
//! # Design Principles
//!
//! - **Fail fast**: configuration errors are returned before any combatant
//!   state is built
//! - **Rich Context**: errors name the offending combatant and stat
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::stats::Stat;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: missing stat field, zero max HP
    Validation,

    /// Unexpected state inconsistency; indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all duel-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid combatant configuration detected before a match starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantError {
    #[error("combatant `{combatant}` is missing required stat `{stat}`")]
    MissingStat { combatant: String, stat: Stat },

    #[error("combatant `{combatant}` has negative `{stat}` ({value})")]
    NegativeStat {
        combatant: String,
        stat: Stat,
        value: i64,
    },

    #[error("combatant `{combatant}` composes to a non-positive max HP")]
    NonPositiveMaxHp { combatant: String },

    #[error("boss match requires exactly one boss combatant, found {found}")]
    BossCount { found: usize },
}

impl CombatantError {
    /// Name of the combatant the error refers to, when it concerns one.
    pub fn combatant(&self) -> Option<&str> {
        match self {
            Self::MissingStat { combatant, .. }
            | Self::NegativeStat { combatant, .. }
            | Self::NonPositiveMaxHp { combatant } => Some(combatant),
            Self::BossCount { .. } => None,
        }
    }
}

impl GameError for CombatantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingStat { .. } => "COMBATANT_MISSING_STAT",
            Self::NegativeStat { .. } => "COMBATANT_NEGATIVE_STAT",
            Self::NonPositiveMaxHp { .. } => "COMBATANT_NON_POSITIVE_MAX_HP",
            Self::BossCount { .. } => "MATCH_BOSS_COUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_stat_message_names_field() {
        let err = CombatantError::MissingStat {
            combatant: "Aria".into(),
            stat: Stat::Rescap,
        };
        assert_eq!(
            err.to_string(),
            "combatant `Aria` is missing required stat `rescap`"
        );
        assert_eq!(err.error_code(), "COMBATANT_MISSING_STAT");
        assert_eq!(err.combatant(), Some("Aria"));
        assert!(!err.severity().is_internal());
    }
}
