//! Read-only views handed to renderers and other collaborators.

use crate::Color;
use crate::board::{BoardCell, BoardTopology, LinearPosition};
use crate::event::Event;
use crate::piece::PieceId;
use crate::state::{GameState, SelectionPhase, TurnPhase};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One piece as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PieceSnapshot {
    id: PieceId,
    position: LinearPosition,
    cell: BoardCell,
}

/// One player as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerSnapshot {
    color: Color,
    name: String,
    pieces: Vec<PieceSnapshot>,
    is_current_turn: bool,
    home_count: usize,
}

/// Immutable copy of everything a collaborator may render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSnapshot {
    players: Vec<PlayerSnapshot>,
    current_player: usize,
    phase: TurnPhase,
    pending_event: Option<Event>,
    last_event: Option<Event>,
    selection: SelectionPhase,
    extra_turn_pending: bool,
    game_over: bool,
    winner: Option<Color>,
    status: String,
}

impl GameSnapshot {
    pub(crate) fn capture(state: &GameState, board: &BoardTopology, status: &str) -> Self {
        let players = state
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerSnapshot {
                color: player.color(),
                name: player.name().to_string(),
                pieces: player
                    .pieces()
                    .iter()
                    .map(|piece| PieceSnapshot {
                        id: piece.id(),
                        position: piece.position(),
                        cell: board.to_absolute_cell(piece.color(), piece.position()),
                    })
                    .collect(),
                is_current_turn: index == state.current_player_index(),
                home_count: player.home_count(),
            })
            .collect();

        Self {
            players,
            current_player: state.current_player_index(),
            phase: state.phase(),
            pending_event: state.pending_event(),
            last_event: state.last_event(),
            selection: state.selection().clone(),
            extra_turn_pending: state.extra_turn_pending(),
            game_over: state.is_game_over(),
            winner: state.winner(),
            status: status.to_string(),
        }
    }

    /// Looks up a piece's position by id.
    pub fn position_of(&self, id: PieceId) -> Option<LinearPosition> {
        self.players
            .iter()
            .flat_map(|p| p.pieces.iter())
            .find(|p| p.id == id)
            .map(|p| p.position)
    }

    /// The player to act.
    pub fn current(&self) -> &PlayerSnapshot {
        &self.players[self.current_player]
    }
}
