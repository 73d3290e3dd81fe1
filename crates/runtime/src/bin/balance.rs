//! Balance-tuning tool.
//!
//! Loads duel content, runs one matchup many times in bulk and prints the
//! aggregate report as JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! DUEL_MATCHUP=boss DUEL_RUNS=5000 DUEL_SEED=42 cargo run -p duel-runtime --bin duel-balance
//! ```

use std::sync::Arc;

use anyhow::Result;
use duel_content::{Content, ContentFactory, builtin};
use duel_core::{DuelEngine, PcgRng};
use duel_runtime::{
    BalanceSettings, BulkRequest, BulkSimulator, CancelToken, ReplayPacing, RuntimeError,
    logging, replay_paced,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::setup_logging()?;

    let settings = BalanceSettings::from_env();
    let content = load_content(&settings)?;
    let matchup = content
        .matchup(&settings.matchup)
        .cloned()
        .ok_or_else(|| RuntimeError::UnknownMatchup(settings.matchup.clone()))?;
    let seed = settings.resolved_seed();

    tracing::info!(
        matchup = %matchup.name,
        kind = %matchup.kind,
        runs = settings.runs,
        seed,
        "starting bulk simulation"
    );

    if settings.replay {
        replay_one(&content, &matchup, seed).await?;
    }

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, finishing running matches");
            on_interrupt.cancel();
        }
    });

    let simulator = BulkSimulator::new(Arc::new(content.config), Arc::new(content.catalog));
    let request = BulkRequest::new(matchup.first, matchup.second, matchup.kind)
        .runs(settings.runs)
        .seed(seed)
        .batch_size(settings.batch_size);
    let report = simulator.run(request, cancel).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_content(settings: &BalanceSettings) -> Result<Content> {
    match &settings.content_dir {
        Some(dir) => {
            tracing::info!("Loading content from {}", dir.display());
            ContentFactory::new(dir).load()
        }
        None => builtin::content(),
    }
}

/// Record one match with the base seed and stream it to stderr.
async fn replay_one(content: &Content, matchup: &duel_content::Matchup, seed: u64) -> Result<()> {
    let engine = DuelEngine::new(&content.config, &content.catalog);
    let result = engine.run(
        &matchup.first,
        &matchup.second,
        matchup.kind,
        &mut PcgRng::seeded(seed),
    )?;

    let (tx, mut rx) = mpsc::channel(16);
    let player = tokio::spawn(replay_paced(result.steps, ReplayPacing::default(), tx));
    while let Some(step) = rx.recv().await {
        for line in &step.lines {
            eprintln!("[{}] {}", step.phase, line);
        }
    }
    player.await??;
    Ok(())
}
