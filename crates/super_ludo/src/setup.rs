//! Game setup phase.
//!
//! A [`GameSetup`] collects the table size, names, optional piece
//! placements and the starting seat. [`GameSetup::start`] consumes it and
//! yields a running [`TurnEngine`], so a setup cannot be started twice.

use crate::board::LinearPosition;
use crate::config::EngineConfig;
use crate::engine::{TurnEngine, build_players};
use crate::error::EngineError;
use crate::piece::PieceId;
use crate::state::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Builder for a game that has not started yet.
#[derive(Debug, Clone)]
pub struct GameSetup {
    config: EngineConfig,
    placements: Vec<(PieceId, i16)>,
    starting_player: usize,
}

impl GameSetup {
    /// Creates a setup for `player_count` players with default settings.
    pub fn new(player_count: usize) -> Self {
        Self::from_config(EngineConfig::new(player_count))
    }

    /// Creates a setup from a configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            placements: Vec::new(),
            starting_player: 0,
        }
    }

    /// Sets the display names by seat.
    pub fn named<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.config = self
            .config
            .with_player_names(names.into_iter().map(Into::into).collect());
        self
    }

    /// Places a piece at a linear position before the game starts.
    pub fn place(mut self, id: PieceId, position: i16) -> Self {
        self.placements.push((id, position));
        self
    }

    /// Hands the first turn to the given seat.
    pub fn starting_player(mut self, index: usize) -> Self {
        self.starting_player = index;
        self
    }

    /// Starts the game, seeding from the config or from the OS.
    pub fn start(self) -> Result<TurnEngine<StdRng>, EngineError> {
        let rng = match self.config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        self.start_with_rng(rng)
    }

    /// Starts a reproducible game.
    pub fn start_seeded(self, seed: u64) -> Result<TurnEngine<StdRng>, EngineError> {
        self.start_with_rng(StdRng::seed_from_u64(seed))
    }

    /// Starts the game with the given random source.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPlayerCount`] outside 2-4 players
    /// - [`EngineError::Config`] for invalid names, safe layout or weights
    /// - [`EngineError::UnknownPiece`] for a placement of an unseated piece
    /// - [`EngineError::InvalidPosition`] for a placement off the board
    /// - [`EngineError::UnknownPlayer`] for a starting seat nobody occupies
    #[instrument(skip(self, rng), fields(players = *self.config.player_count()))]
    pub fn start_with_rng<R: Rng>(self, rng: R) -> Result<TurnEngine<R>, EngineError> {
        let players = build_players(*self.config.player_count(), |seat| {
            self.config.name_for(seat)
        })?;
        self.config.validate()?;
        let board = self.config.topology()?;
        let generator = self.config.generator()?;

        let mut state = GameState::new(players);
        if self.starting_player >= state.players().len() {
            return Err(EngineError::UnknownPlayer(self.starting_player));
        }
        state.current_player = self.starting_player;

        for (id, value) in &self.placements {
            let position =
                LinearPosition::new(*value).ok_or(EngineError::InvalidPosition(*value))?;
            let piece = state
                .piece_mut(*id)
                .ok_or(EngineError::UnknownPiece(*id))?;
            debug!(piece = %id, %position, "Placing piece");
            piece.set_position(position);
        }

        let finished: Vec<_> = state
            .players()
            .iter()
            .filter(|p| p.has_won())
            .map(|p| (p.color(), p.name().to_string()))
            .collect();
        if finished.len() > 1 {
            return Err(EngineError::InvariantViolation(
                "more than one player has every piece home".to_string(),
            ));
        }
        let status = match finished.into_iter().next() {
            Some((winner, name)) => {
                state.game_over = true;
                state.winner = Some(winner);
                format!("Game Over! {} wins!", name)
            }
            None => format!("Game started! {}'s turn.", state.current_player().name()),
        };

        info!(
            starting_player = self.starting_player,
            placements = self.placements.len(),
            "Game started"
        );
        Ok(TurnEngine::assemble(board, generator, state, rng, status))
    }
}
