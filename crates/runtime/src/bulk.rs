//! Concurrent bulk simulation for balance testing.
//!
//! A bulk run is split into batches. Each batch runs on
//! [`tokio::task::spawn_blocking`] with its own engine, RNG and [`Tally`];
//! nothing mutable is shared between batches except the [`CancelToken`].
//! Tallies are merged once every batch has joined.
//!
//! Each match derives its seed from `(base_seed, run_index)` via
//! [`compute_seed`], so a report does not depend on batch size or scheduling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use duel_core::{
    Catalog, CombatantSpec, DuelConfig, DuelEngine, MatchKind, PcgRng, Side, Tally,
    compute_seed,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};

/// Best-effort stop signal, checked between matches.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One matchup to simulate `runs` times.
#[derive(Clone, Debug)]
pub struct BulkRequest {
    pub first: CombatantSpec,
    pub second: CombatantSpec,
    pub kind: MatchKind,
    pub runs: u64,
    pub seed: u64,
    pub batch_size: u64,
}

impl BulkRequest {
    pub fn new(first: CombatantSpec, second: CombatantSpec, kind: MatchKind) -> Self {
        Self {
            first,
            second,
            kind,
            runs: 1_000,
            seed: 0,
            batch_size: 64,
        }
    }

    pub fn runs(mut self, runs: u64) -> Self {
        self.runs = runs;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Damage distribution of one side, flattened for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DamageStats {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p90: u64,
}

/// Aggregate outcome of a bulk run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BulkReport {
    pub seed: u64,
    pub requested: u64,
    pub completed: u64,
    pub cancelled: bool,
    /// Win rate of each side, in side order.
    pub win_rate: [f64; 2],
    pub draw_rate: f64,
    pub average_rounds: f64,
    pub damage: [DamageStats; 2],
    #[serde(skip)]
    pub tally: Tally,
}

impl BulkReport {
    fn new(seed: u64, requested: u64, cancelled: bool, tally: Tally) -> Self {
        let draw_rate = if tally.matches == 0 {
            0.0
        } else {
            tally.draws as f64 / tally.matches as f64
        };
        let damage = Side::BOTH.map(|side| {
            let histogram = &tally.damage[side.index()];
            DamageStats {
                min: histogram.min().unwrap_or(0),
                max: histogram.max().unwrap_or(0),
                mean: histogram.mean().unwrap_or(0.0),
                p50: histogram.percentile(50.0).unwrap_or(0),
                p90: histogram.percentile(90.0).unwrap_or(0),
            }
        });

        Self {
            seed,
            requested,
            completed: tally.matches,
            cancelled,
            win_rate: Side::BOTH.map(|side| tally.win_rate(side)),
            draw_rate,
            average_rounds: tally.average_rounds(),
            damage,
            tally,
        }
    }
}

/// Runs bulk simulations against a shared, immutable config and catalog.
#[derive(Clone)]
pub struct BulkSimulator {
    config: Arc<DuelConfig>,
    catalog: Arc<Catalog>,
}

impl BulkSimulator {
    pub fn new(config: Arc<DuelConfig>, catalog: Arc<Catalog>) -> Self {
        Self { config, catalog }
    }

    /// Simulate `request.runs` matches and merge their tallies.
    ///
    /// # Errors
    ///
    /// Invalid combatant records are rejected before any batch is spawned.
    pub async fn run(&self, request: BulkRequest, cancel: CancelToken) -> Result<BulkReport> {
        DuelEngine::new(&self.config, self.catalog.as_ref()).prepare(
            &request.first,
            &request.second,
            request.kind,
        )?;

        let request = Arc::new(request);
        let batch_size = request.batch_size.max(1);
        let mut handles = Vec::new();
        let mut start = 0;
        while start < request.runs {
            let end = (start + batch_size).min(request.runs);
            let config = Arc::clone(&self.config);
            let catalog = Arc::clone(&self.catalog);
            let request = Arc::clone(&request);
            let cancel = cancel.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                run_batch(&config, catalog.as_ref(), &request, start..end, &cancel)
            }));
            start = end;
        }

        let mut tally = Tally::new();
        for handle in handles {
            let batch = handle.await.map_err(RuntimeError::WorkerJoin)??;
            tally.merge(&batch);
        }

        let cancelled = cancel.is_cancelled() && tally.matches < request.runs;
        if cancelled {
            warn!(
                completed = tally.matches,
                requested = request.runs,
                "bulk simulation cancelled"
            );
        }

        let report = BulkReport::new(request.seed, request.runs, cancelled, tally);
        info!(
            runs = report.completed,
            first_win_rate = report.win_rate[0],
            second_win_rate = report.win_rate[1],
            average_rounds = report.average_rounds,
            "bulk simulation finished"
        );
        Ok(report)
    }
}

fn run_batch(
    config: &DuelConfig,
    catalog: &Catalog,
    request: &BulkRequest,
    runs: std::ops::Range<u64>,
    cancel: &CancelToken,
) -> Result<Tally> {
    let engine = DuelEngine::new(config, catalog);
    let mut tally = Tally::new();
    let first_run = runs.start;

    for index in runs {
        if cancel.is_cancelled() {
            break;
        }
        let mut rng = PcgRng::seeded(compute_seed(request.seed, index));
        let summary = engine.simulate(&request.first, &request.second, request.kind, &mut rng)?;
        tally.record(&summary);
    }

    debug!(first_run, matches = tally.matches, "batch finished");
    Ok(tally)
}
