//! Command-line interface for super_ludo_sim.

use clap::Parser;
use std::path::PathBuf;

/// Super Ludo simulator - plays seeded games with random choices
#[derive(Parser, Debug)]
#[command(name = "super_ludo_sim")]
#[command(about = "Headless autoplay for crystal-ball Ludo", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of games to play
    #[arg(short, long, default_value = "100")]
    pub games: usize,

    /// Players per game (2-4). Overrides the config file.
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Base seed; game N is seeded with seed + N. Overrides the config file.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Abandon a game after this many rolls
    #[arg(long, default_value = "2000")]
    pub max_turns: usize,

    /// Path to an engine config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the final snapshot of the last game as JSON
    #[arg(long)]
    pub json: bool,
}
