//! Game state owned by the turn engine.

use crate::Color;
use crate::event::Event;
use crate::piece::{Piece, PieceId};
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Pending selection the engine is waiting for, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPhase {
    /// Nothing to select.
    #[default]
    None,
    /// The current player must pick one of their own pieces.
    AwaitingPieceSelection {
        /// Pieces that may be picked.
        eligible: Vec<PieceId>,
    },
    /// The current player must pick an opponent piece.
    AwaitingTargetSelection {
        /// Pieces that may be picked.
        eligible: Vec<PieceId>,
    },
}

impl SelectionPhase {
    /// Ids valid for this selection (empty when nothing is pending).
    pub fn eligible(&self) -> &[PieceId] {
        match self {
            SelectionPhase::None => &[],
            SelectionPhase::AwaitingPieceSelection { eligible }
            | SelectionPhase::AwaitingTargetSelection { eligible } => eligible,
        }
    }

    /// True when a selection is pending.
    pub fn is_pending(&self) -> bool {
        !matches!(self, SelectionPhase::None)
    }
}

/// Coarse state-machine phase, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    AwaitingRoll,
    /// Waiting for the current player to pick one of their pieces.
    AwaitingPieceSelection,
    /// Waiting for the current player to pick an opponent piece.
    AwaitingTargetSelection,
    /// Someone won; only reset is accepted.
    GameOver,
}

impl TurnPhase {
    /// Lowercase description used in messages.
    pub fn name(self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll => "awaiting a roll",
            TurnPhase::AwaitingPieceSelection => "awaiting piece selection",
            TurnPhase::AwaitingTargetSelection => "awaiting target selection",
            TurnPhase::GameOver => "the game is over",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Complete state of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) current_player: usize,
    pub(crate) pending_event: Option<Event>,
    pub(crate) last_event: Option<Event>,
    pub(crate) selection: SelectionPhase,
    pub(crate) extra_turn_pending: bool,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<Color>,
}

impl GameState {
    /// Creates a fresh state with player 0 to move.
    pub(crate) fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            current_player: 0,
            pending_event: None,
            last_event: None,
            selection: SelectionPhase::None,
            extra_turn_pending: false,
            game_over: false,
            winner: None,
        }
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the player to act.
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    /// The player to act.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Event awaiting resolution.
    pub fn pending_event(&self) -> Option<Event> {
        self.pending_event
    }

    /// Most recent event, kept after the turn ends.
    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    /// Pending selection.
    pub fn selection(&self) -> &SelectionPhase {
        &self.selection
    }

    /// True between a super boost and the turn end that consumes it.
    pub fn extra_turn_pending(&self) -> bool {
        self.extra_turn_pending
    }

    /// True once someone has won.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            return TurnPhase::GameOver;
        }
        match self.selection {
            SelectionPhase::None => TurnPhase::AwaitingRoll,
            SelectionPhase::AwaitingPieceSelection { .. } => TurnPhase::AwaitingPieceSelection,
            SelectionPhase::AwaitingTargetSelection { .. } => TurnPhase::AwaitingTargetSelection,
        }
    }

    /// Player index seated with the given color.
    pub fn player_index(&self, color: Color) -> Option<usize> {
        self.players.iter().position(|p| p.color() == color)
    }

    /// Player seated with the given color.
    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color() == color)
    }

    /// Looks up a piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.player(id.owner).and_then(|p| p.piece(id))
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.players
            .iter_mut()
            .find(|p| p.color() == id.owner)
            .and_then(|p| p.piece_mut(id))
    }

    /// Every piece in the game, in seating order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.iter().flat_map(|p| p.pieces().iter())
    }

    /// Pieces belonging to everyone except the current player.
    pub fn opponent_pieces(&self) -> impl Iterator<Item = &Piece> {
        let current = self.current_player().color();
        self.pieces().filter(move |p| p.color() != current)
    }

    /// Returns every piece to base and hands the turn to player 0.
    ///
    /// Player identities and names are preserved.
    pub(crate) fn reset(&mut self) {
        for player in &mut self.players {
            player.return_all_to_base();
        }
        self.current_player = 0;
        self.pending_event = None;
        self.last_event = None;
        self.selection = SelectionPhase::None;
        self.extra_turn_pending = false;
        self.game_over = false;
        self.winner = None;
    }
}
