//! Drives engines to completion with uniformly random selections.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use super_ludo::{
    Color, EngineConfig, EngineError, EventKind, GameSetup, GameSnapshot, PieceId, TurnEngine,
    TurnPhase,
};
use tracing::{debug, info, instrument};

/// Seed offset separating selection choices from crystal ball draws.
const CHOOSER_SALT: u64 = 0x5eed_1ad0;

/// Result of one autoplayed game.
#[derive(Debug, Clone)]
pub struct GameReport {
    /// Winner, if the game finished within the turn limit.
    pub winner: Option<Color>,
    /// Rolls taken.
    pub turns: usize,
    /// Events drawn, by kind.
    pub events: HashMap<EventKind, usize>,
    /// Final state.
    pub snapshot: GameSnapshot,
}

/// Aggregate over many games.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Games played.
    pub games: usize,
    /// Wins by color.
    pub wins: HashMap<Color, usize>,
    /// Games abandoned at the turn limit.
    pub unfinished: usize,
    /// Rolls taken over all games.
    pub total_turns: usize,
    /// Events drawn over all games, by kind.
    pub events: HashMap<EventKind, usize>,
}

impl Summary {
    /// Folds one game into the totals.
    pub fn record(&mut self, report: &GameReport) {
        self.games += 1;
        self.total_turns += report.turns;
        match report.winner {
            Some(color) => *self.wins.entry(color).or_default() += 1,
            None => self.unfinished += 1,
        }
        for (kind, count) in &report.events {
            *self.events.entry(*kind).or_default() += count;
        }
    }

    /// Mean rolls per game.
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    /// Renders the summary as a plain-text report.
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "Played {} games, average {:.1} turns per game",
            self.games,
            self.average_turns()
        )];

        lines.push("Wins:".to_string());
        for color in Color::iter() {
            if let Some(wins) = self.wins.get(&color) {
                lines.push(format!("  {:<8}{}", color, wins));
            }
        }
        if self.unfinished > 0 {
            lines.push(format!("  {:<8}{}", "none", self.unfinished));
        }

        let drawn: usize = self.events.values().sum();
        lines.push("Events:".to_string());
        for kind in EventKind::iter() {
            let count = self.events.get(&kind).copied().unwrap_or(0);
            let share = if drawn == 0 {
                0.0
            } else {
                100.0 * count as f64 / drawn as f64
            };
            lines.push(format!("  {:<14}{:>8} ({:.2}%)", kind, count, share));
        }
        lines.join("\n")
    }
}

/// Plays one game from `seed` until someone wins or `max_turns` rolls pass.
#[instrument(skip(config))]
pub fn play_game(
    config: &EngineConfig,
    seed: u64,
    max_turns: usize,
) -> Result<GameReport, EngineError> {
    let mut engine = GameSetup::from_config(config.clone()).start_seeded(seed)?;
    let mut chooser = StdRng::seed_from_u64(seed ^ CHOOSER_SALT);
    let mut events: HashMap<EventKind, usize> = HashMap::new();
    let mut turns = 0;

    loop {
        match engine.phase() {
            TurnPhase::GameOver => break,
            TurnPhase::AwaitingRoll if turns >= max_turns => break,
            TurnPhase::AwaitingRoll => {
                let event = engine.request_roll()?;
                *events.entry(event.kind()).or_default() += 1;
                turns += 1;
            }
            TurnPhase::AwaitingPieceSelection => {
                let id = choose(&engine, &mut chooser)?;
                engine.select_piece(id)?;
            }
            TurnPhase::AwaitingTargetSelection => {
                let id = choose(&engine, &mut chooser)?;
                engine.select_target(id)?;
            }
        }
    }

    let winner = engine.state().winner();
    match winner {
        Some(color) => info!(%color, turns, "Game finished"),
        None => info!(turns, "Game abandoned at turn limit"),
    }

    Ok(GameReport {
        winner,
        turns,
        events,
        snapshot: engine.snapshot(),
    })
}

fn choose(engine: &TurnEngine, chooser: &mut StdRng) -> Result<PieceId, EngineError> {
    let eligible = engine.eligible_pieces();
    if eligible.is_empty() {
        return Err(EngineError::InvariantViolation(
            "selection pending with no eligible pieces".to_string(),
        ));
    }
    let id = eligible[chooser.random_range(0..eligible.len())];
    debug!(piece = %id, choices = eligible.len(), "Chose piece");
    Ok(id)
}
