//! Super Ludo simulator
//!
//! Plays complete crystal-ball Ludo games headlessly and reports win
//! counts, game length and the observed event distribution.

#![warn(missing_docs)]

mod autoplay;
mod cli;

use anyhow::{Context, Result};
use autoplay::{Summary, play_game};
use clap::Parser;
use cli::Cli;
use super_ludo::EngineConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,super_ludo=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

#[instrument]
fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(players) = cli.players {
        config = config.with_player_count(players);
    }
    config.validate().context("Invalid configuration")?;

    let base_seed = cli.seed.or(*config.seed()).unwrap_or_default();
    info!(
        games = cli.games,
        players = *config.player_count(),
        base_seed,
        "Starting simulation"
    );

    let mut summary = Summary::default();
    let mut last = None;
    for game in 0..cli.games {
        let seed = base_seed.wrapping_add(game as u64);
        let report = play_game(&config, seed, cli.max_turns)
            .with_context(|| format!("Game {} (seed {}) failed", game, seed))?;
        summary.record(&report);
        last = Some(report);
    }

    println!("{}", summary.render());

    if cli.json {
        if let Some(report) = last {
            println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
        }
    }

    Ok(())
}
