//! Balance tool settings loaded from the environment.

use std::env;
use std::path::PathBuf;

/// Settings of one `duel-balance` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSettings {
    pub runs: u64,
    /// Base seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    pub batch_size: u64,
    /// Content directory; the shipped content is used when unset.
    pub content_dir: Option<PathBuf>,
    pub matchup: String,
    /// Also stream one recorded match to stderr, paced per phase.
    pub replay: bool,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            runs: 1_000,
            seed: None,
            batch_size: 64,
            content_dir: None,
            matchup: "standard".to_string(),
            replay: false,
        }
    }
}

impl BalanceSettings {
    /// Construct settings from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_RUNS` - Number of matches (default: 1000)
    /// - `DUEL_SEED` - Base seed (default: random)
    /// - `DUEL_BATCH_SIZE` - Matches per blocking task (default: 64)
    /// - `DUEL_CONTENT_DIR` - Data directory (default: shipped content)
    /// - `DUEL_MATCHUP` - Matchup name (default: standard)
    /// - `DUEL_REPLAY` - Stream one paced replay to stderr (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string());

        if let Some(runs) = read("DUEL_RUNS").and_then(|v| v.parse::<u64>().ok()) {
            settings.runs = runs;
        }
        if let Some(seed) = read("DUEL_SEED").and_then(|v| v.parse::<u64>().ok()) {
            settings.seed = Some(seed);
        }
        if let Some(size) = read("DUEL_BATCH_SIZE").and_then(|v| v.parse::<u64>().ok()) {
            settings.batch_size = size.max(1);
        }
        if let Some(dir) = read("DUEL_CONTENT_DIR").filter(|v| !v.is_empty()) {
            settings.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(name) = read("DUEL_MATCHUP").filter(|v| !v.is_empty()) {
            settings.matchup = name;
        }
        if let Some(replay) = read("DUEL_REPLAY").and_then(|v| parse_bool(&v)) {
            settings.replay = replay;
        }

        settings
    }

    /// The configured seed, or a fresh random one.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
