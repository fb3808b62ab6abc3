//! The turn engine: crystal ball dispatch, movement, capture and win rules.
//!
//! # State machine
//!
//! ```text
//! AwaitingRoll ──roll──▶ event ─┬─▶ AwaitingPieceSelection ──select_piece──┐
//!      ▲                        ├─▶ AwaitingTargetSelection ─select_target─┤
//!      │                        └─▶ auto-resolved ─────────────────────────┤
//!      └──────────────────────── turn ends ◀──────────────────────────────┘
//!                                    └─▶ GameOver (terminal until reset)
//! ```
//!
//! Every public operation runs to completion before returning. Calls that
//! do not match the current phase are rejected with
//! [`EngineError::WrongPhase`] and leave the state untouched.

use crate::Color;
use crate::board::{BoardTopology, LinearPosition, RING_SIZE};
use crate::config::{EngineConfig, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::EngineError;
use crate::event::{ENTRY_ROLL, Event, EventGenerator, MAX_ROLL};
use crate::invariants::{self, InvariantSet, LudoInvariants};
use crate::outcome::MoveOutcome;
use crate::piece::PieceId;
use crate::player::Player;
use crate::setup::GameSetup;
use crate::snapshot::GameSnapshot;
use crate::state::{GameState, SelectionPhase, TurnPhase};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Runs one game session.
///
/// The engine exclusively owns the [`GameState`] and the random source.
/// Collaborators drive it through the operations below and read
/// [`GameSnapshot`]s back; they never mutate state directly.
#[derive(Debug, Clone)]
pub struct TurnEngine<R = StdRng> {
    board: BoardTopology,
    generator: EventGenerator,
    state: GameState,
    rng: R,
    status: String,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl TurnEngine<StdRng> {
    /// Creates a game for `player_count` players with an OS-seeded RNG.
    #[instrument]
    pub fn new(player_count: usize) -> Result<Self, EngineError> {
        GameSetup::new(player_count).start()
    }

    /// Creates a reproducible game from a seed.
    #[instrument]
    pub fn seeded(player_count: usize, seed: u64) -> Result<Self, EngineError> {
        GameSetup::new(player_count).start_seeded(seed)
    }

    /// Creates a game from a validated configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        GameSetup::from_config(config.clone()).start()
    }
}

impl<R: Rng> TurnEngine<R> {
    /// Creates a game driven by the given random source.
    #[instrument(skip(rng))]
    pub fn with_rng(player_count: usize, rng: R) -> Result<Self, EngineError> {
        GameSetup::new(player_count).start_with_rng(rng)
    }

    pub(crate) fn assemble(
        board: BoardTopology,
        generator: EventGenerator,
        state: GameState,
        rng: R,
        status: String,
    ) -> Self {
        let engine = Self {
            board,
            generator,
            state,
            rng,
            status,
        };
        engine.check_invariants();
        engine
    }

    /// Starts a new session with fresh default-named players.
    ///
    /// On an invalid count the current session is left as it was.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, player_count: usize) -> Result<GameSnapshot, EngineError> {
        let players = build_players(player_count, Player::default_name)?;
        self.state = GameState::new(players);
        self.status = format!(
            "Game started! {}'s turn.",
            self.state.current_player().name()
        );
        info!(player_count, "Game initialized");
        self.check_invariants();
        Ok(self.snapshot())
    }

    /// Returns every piece to base and hands the turn back to player 0.
    ///
    /// Accepted in any phase. Player colors and names are kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) -> GameSnapshot {
        self.state.reset();
        self.status = format!(
            "Game reset! {}'s turn.",
            self.state.current_player().name()
        );
        info!("Game reset");
        self.check_invariants();
        self.snapshot()
    }

    /// Changes a player's display name.
    #[instrument(skip(self, name))]
    pub fn rename_player(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), EngineError> {
        let player = self
            .state
            .players
            .get_mut(index)
            .ok_or(EngineError::UnknownPlayer(index))?;
        let name = name.into();
        debug!(index, old = %player.name(), new = %name, "Renaming player");
        player.set_name(name);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

impl<R> TurnEngine<R> {
    /// Immutable view of the whole game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.board, &self.status)
    }

    /// Borrowed view of the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Board geometry in use.
    pub fn board(&self) -> &BoardTopology {
        &self.board
    }

    /// Event generator in use.
    pub fn generator(&self) -> &EventGenerator {
        &self.generator
    }

    /// Latest status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Ids accepted by the pending selection (empty when none is pending).
    pub fn eligible_pieces(&self) -> &[PieceId] {
        self.state.selection().eligible()
    }
}

// ─────────────────────────────────────────────────────────────
//  Turn operations
// ─────────────────────────────────────────────────────────────

impl<R: Rng> TurnEngine<R> {
    /// Draws a crystal ball event and dispatches it.
    ///
    /// # Errors
    ///
    /// [`EngineError::WrongPhase`] unless the engine is awaiting a roll.
    #[instrument(skip(self), fields(player = self.state.current_player_index()))]
    pub fn request_roll(&mut self) -> Result<Event, EngineError> {
        self.ensure_awaiting_roll()?;
        let event = self.generator.draw(&mut self.rng);
        self.apply_event(event)
    }

    /// Dispatches an event produced outside the engine.
    ///
    /// Obeys exactly the same phase rules as [`request_roll`](Self::request_roll).
    ///
    /// # Errors
    ///
    /// - [`EngineError::WrongPhase`] unless the engine is awaiting a roll
    /// - [`EngineError::InvalidRoll`] for a normal roll outside 1-6
    #[instrument(skip(self), fields(player = self.state.current_player_index()))]
    pub fn apply_event(&mut self, event: Event) -> Result<Event, EngineError> {
        self.ensure_awaiting_roll()?;
        if let Event::NormalRoll(value) = event {
            if !(1..=MAX_ROLL).contains(&value) {
                warn!(value, "Rejected out-of-range roll");
                return Err(EngineError::InvalidRoll(value));
            }
        }

        let player = self.state.current_player();
        info!(player = %player.name(), color = %player.color(), %event, "Crystal ball event");
        self.state.pending_event = Some(event);
        self.state.last_event = Some(event);

        match event {
            Event::NormalRoll(steps) => {
                let eligible = self.movable_pieces(steps);
                self.await_or_pass(
                    SelectionPhase::AwaitingPieceSelection { eligible },
                    format!("Select a piece to move {} spaces.", steps),
                    "No valid moves available. Turn passes to next player.",
                );
            }
            Event::BlackHole => self.auto_resolve("Black Hole! You lose your turn."),
            Event::SuperBoost => {
                self.state.extra_turn_pending = true;
                self.auto_resolve("Super Boost! You get an extra turn.");
            }
            Event::Wormhole => {
                let eligible = self.own_ring_pieces();
                self.await_or_pass(
                    SelectionPhase::AwaitingPieceSelection { eligible },
                    "Wormhole! Select a piece to jump to the next safe zone.".to_string(),
                    "Wormhole! But you have no pieces on the ring. Turn passes to next player.",
                );
            }
            Event::MeteorStrike => {
                let eligible = self.capturable_opponents();
                self.await_or_pass(
                    SelectionPhase::AwaitingTargetSelection { eligible },
                    "Meteor Strike! Select an opponent's piece to send back to base.".to_string(),
                    "Meteor Strike! But there are no pieces to hit. Turn passes to next player.",
                );
            }
            Event::AlienInvasion => {
                let eligible = self.opponent_ring_pieces();
                self.await_or_pass(
                    SelectionPhase::AwaitingTargetSelection { eligible },
                    "Alien Invasion! Select an opponent's piece to send to a random location."
                        .to_string(),
                    "Alien Invasion! But there are no pieces to abduct. Turn passes to next player.",
                );
            }
        }

        self.check_invariants();
        Ok(event)
    }

    /// Resolves a normal roll or wormhole with one of the current player's pieces.
    ///
    /// # Errors
    ///
    /// - [`EngineError::WrongPhase`] unless awaiting piece selection
    /// - [`EngineError::IneligibleSelection`] if `id` is not eligible
    #[instrument(skip(self), fields(piece = %id))]
    pub fn select_piece(&mut self, id: PieceId) -> Result<MoveOutcome, EngineError> {
        match self.state.selection() {
            SelectionPhase::AwaitingPieceSelection { eligible } => {
                self.ensure_eligible(eligible, id)?
            }
            _ => return Err(self.wrong_phase("select a piece")),
        }

        let outcome = match self.state.pending_event() {
            Some(Event::NormalRoll(steps)) => self.advance(id, steps)?,
            Some(Event::Wormhole) => self.warp(id)?,
            other => {
                return Err(EngineError::InvariantViolation(format!(
                    "piece selection pending for {:?}",
                    other
                )));
            }
        };

        self.finish_resolution(&outcome);
        Ok(outcome)
    }

    /// Resolves a meteor strike or alien invasion against an opponent piece.
    ///
    /// # Errors
    ///
    /// - [`EngineError::WrongPhase`] unless awaiting target selection
    /// - [`EngineError::IneligibleSelection`] if `id` is not eligible
    #[instrument(skip(self), fields(piece = %id))]
    pub fn select_target(&mut self, id: PieceId) -> Result<MoveOutcome, EngineError> {
        match self.state.selection() {
            SelectionPhase::AwaitingTargetSelection { eligible } => {
                self.ensure_eligible(eligible, id)?
            }
            _ => return Err(self.wrong_phase("select a target")),
        }

        let outcome = match self.state.pending_event() {
            Some(Event::MeteorStrike) => self.strike(id)?,
            Some(Event::AlienInvasion) => self.abduct(id)?,
            other => {
                return Err(EngineError::InvariantViolation(format!(
                    "target selection pending for {:?}",
                    other
                )));
            }
        };

        self.finish_resolution(&outcome);
        Ok(outcome)
    }
}

// ─────────────────────────────────────────────────────────────
//  Dispatch helpers
// ─────────────────────────────────────────────────────────────

impl<R: Rng> TurnEngine<R> {
    fn ensure_awaiting_roll(&self) -> Result<(), EngineError> {
        match self.state.phase() {
            TurnPhase::AwaitingRoll => Ok(()),
            _ => Err(self.wrong_phase("roll")),
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> EngineError {
        let phase = self.state.phase();
        warn!(operation, %phase, "Operation rejected in current phase");
        EngineError::WrongPhase {
            operation,
            phase: phase.name(),
        }
    }

    fn ensure_eligible(&self, eligible: &[PieceId], id: PieceId) -> Result<(), EngineError> {
        if eligible.contains(&id) {
            Ok(())
        } else {
            warn!(piece = %id, ?eligible, "Ineligible selection");
            Err(EngineError::IneligibleSelection(id))
        }
    }

    /// Enters the selection if anything is eligible, otherwise passes the turn.
    fn await_or_pass(&mut self, selection: SelectionPhase, prompt: String, pass: &str) {
        if selection.eligible().is_empty() {
            self.auto_resolve(pass);
        } else {
            debug!(eligible = ?selection.eligible(), "Awaiting selection");
            self.state.selection = selection;
            self.status = prompt;
        }
    }

    fn auto_resolve(&mut self, message: &str) {
        self.status = message.to_string();
        self.end_turn();
    }

    fn finish_resolution(&mut self, outcome: &MoveOutcome) {
        info!(%outcome, "Selection resolved");
        self.status = outcome.to_string();
        self.state.selection = SelectionPhase::None;

        let acting = self.state.current_player();
        if acting.has_won() {
            let (winner, name) = (acting.color(), acting.name().to_string());
            self.state.game_over = true;
            self.state.winner = Some(winner);
            self.state.pending_event = None;
            self.status = format!("Game Over! {} wins!", name);
            info!(%winner, %name, "Game over");
        } else {
            self.end_turn();
        }
        self.check_invariants();
    }

    /// Passes the turn, unless a super boost grants the same player another.
    fn end_turn(&mut self) {
        self.state.selection = SelectionPhase::None;
        self.state.pending_event = None;
        if self.state.game_over {
            return;
        }

        if self.state.extra_turn_pending {
            self.state.extra_turn_pending = false;
            debug!("Extra turn consumed");
        } else {
            self.state.current_player = (self.state.current_player + 1) % self.state.players.len();
        }

        if !self.status.ends_with('.') && !self.status.ends_with('!') {
            self.status.push('.');
        }
        let next = self.state.current_player().name().to_string();
        self.status = format!("{} {}'s turn.", self.status, next);
        debug!(next_player = self.state.current_player, "Turn ended");
    }
}

// ─────────────────────────────────────────────────────────────
//  Eligibility
// ─────────────────────────────────────────────────────────────

impl<R> TurnEngine<R> {
    /// Current player's pieces that a normal roll of `steps` may move.
    ///
    /// Pieces that would overshoot are still eligible; picking one ends
    /// the turn without moving.
    fn movable_pieces(&self, steps: u8) -> Vec<PieceId> {
        self.state
            .current_player()
            .pieces()
            .iter()
            .filter(|p| !p.is_home() && (!p.is_in_base() || steps == ENTRY_ROLL))
            .map(|p| p.id())
            .collect()
    }

    fn own_ring_pieces(&self) -> Vec<PieceId> {
        self.state
            .current_player()
            .pieces()
            .iter()
            .filter(|p| p.is_on_ring())
            .map(|p| p.id())
            .collect()
    }

    fn capturable_opponents(&self) -> Vec<PieceId> {
        self.state
            .opponent_pieces()
            .filter(|p| p.is_capturable(&self.board))
            .map(|p| p.id())
            .collect()
    }

    fn opponent_ring_pieces(&self) -> Vec<PieceId> {
        self.state
            .opponent_pieces()
            .filter(|p| p.is_on_ring())
            .map(|p| p.id())
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────
//  Movement and capture
// ─────────────────────────────────────────────────────────────

impl<R: Rng> TurnEngine<R> {
    fn position_of(&self, id: PieceId) -> Result<LinearPosition, EngineError> {
        self.state
            .piece(id)
            .map(|p| p.position())
            .ok_or(EngineError::UnknownPiece(id))
    }

    fn place(&mut self, id: PieceId, position: LinearPosition) -> Result<(), EngineError> {
        let piece = self
            .state
            .piece_mut(id)
            .ok_or(EngineError::UnknownPiece(id))?;
        debug!(piece = %id, from = %piece.position(), to = %position, "Placing piece");
        piece.set_position(position);
        Ok(())
    }

    fn advance(&mut self, id: PieceId, steps: u8) -> Result<MoveOutcome, EngineError> {
        let from = self.position_of(id)?;

        if from.is_in_base() {
            self.place(id, LinearPosition::START)?;
            return Ok(MoveOutcome::Entered { piece: id });
        }

        match from.advanced_by(steps) {
            None => {
                let needed = from.steps_to_home().unwrap_or_default();
                debug!(piece = %id, %from, steps, needed, "Overshoot");
                Ok(MoveOutcome::Overshoot {
                    piece: id,
                    at: from,
                    rolled: steps,
                    needed,
                })
            }
            Some(to) if to.is_home() => {
                self.place(id, to)?;
                Ok(MoveOutcome::ReachedHome { piece: id, from })
            }
            Some(to) => {
                self.place(id, to)?;
                let captured = self.capture_at(id);
                Ok(MoveOutcome::Moved {
                    piece: id,
                    from,
                    to,
                    captured,
                })
            }
        }
    }

    fn warp(&mut self, id: PieceId) -> Result<MoveOutcome, EngineError> {
        let from = self.position_of(id)?;
        match self.board.next_safe_zone(id.owner, from) {
            Some(to) => {
                self.place(id, to)?;
                let captured = self.capture_at(id);
                Ok(MoveOutcome::Warped {
                    piece: id,
                    from,
                    to,
                    captured,
                })
            }
            None => Ok(MoveOutcome::NoSafeZoneAhead { piece: id }),
        }
    }

    fn strike(&mut self, id: PieceId) -> Result<MoveOutcome, EngineError> {
        let from = self.position_of(id)?;
        self.place(id, LinearPosition::BASE)?;
        Ok(MoveOutcome::SentToBase { piece: id, from })
    }

    fn abduct(&mut self, id: PieceId) -> Result<MoveOutcome, EngineError> {
        let from = self.position_of(id)?;
        let cell = self.rng.random_range(0..RING_SIZE);
        let to = LinearPosition::new(cell as i16).ok_or_else(|| {
            EngineError::InvariantViolation(format!("ring cell {} off the board", cell))
        })?;
        self.place(id, to)?;
        let captured = self.capture_at(id);
        Ok(MoveOutcome::Relocated {
            piece: id,
            from,
            to,
            captured,
        })
    }

    /// Sends every other-colored piece sharing the mover's ring cell to base.
    ///
    /// Nothing is captured on a safe cell, off the ring, or among pieces of
    /// the mover's own color.
    fn capture_at(&mut self, mover: PieceId) -> Vec<PieceId> {
        let Some(cell) = self
            .state
            .piece(mover)
            .and_then(|p| p.ring_cell(&self.board))
        else {
            return Vec::new();
        };
        if self.board.is_safe_cell(cell) {
            return Vec::new();
        }

        let victims: Vec<PieceId> = self
            .state
            .pieces()
            .filter(|p| p.color() != mover.owner && p.ring_cell(&self.board) == Some(cell))
            .map(|p| p.id())
            .collect();

        for victim in &victims {
            if let Some(piece) = self.state.piece_mut(*victim) {
                piece.send_to_base();
                info!(%mover, %victim, cell, "Captured");
            }
        }
        victims
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariants
// ─────────────────────────────────────────────────────────────

impl<R> TurnEngine<R> {
    /// Checks all engine invariants (panics on violation in debug builds).
    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = LudoInvariants::check_all(&self.state) {
            let description = invariants::describe(&violations);
            warn!(%description, "Engine invariant violated");
            debug_assert!(false, "Engine invariant violated: {}", description);
        }
    }
}

/// Builds seated players for a table of `player_count`.
pub(crate) fn build_players(
    player_count: usize,
    name_for: impl Fn(usize) -> String,
) -> Result<Vec<Player>, EngineError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        warn!(player_count, "Invalid player count");
        return Err(EngineError::InvalidPlayerCount(player_count));
    }
    Ok(Color::ALL
        .iter()
        .take(player_count)
        .enumerate()
        .map(|(seat, color)| Player::new(*color, name_for(seat)))
        .collect())
}
