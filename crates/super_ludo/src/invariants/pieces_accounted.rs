//! Pieces accounted invariant: every seat holds exactly its own three pieces.

use super::Invariant;
use crate::board::LinearPosition;
use crate::config::{MAX_PLAYERS, MIN_PLAYERS};
use crate::piece::PIECES_PER_PLAYER;
use crate::state::GameState;
use std::collections::HashSet;

/// Invariant: 2-4 players with distinct colors, each owning pieces
/// numbered 1-3 of their own color, all at legal linear positions.
///
/// Positions are range-checked by construction; this also guards the
/// seating table and the current-player index.
pub struct PiecesAccountedInvariant;

impl Invariant<GameState> for PiecesAccountedInvariant {
    fn holds(state: &GameState) -> bool {
        let players = state.players();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len())
            || state.current_player_index() >= players.len()
        {
            return false;
        }

        let colors: HashSet<_> = players.iter().map(|p| p.color()).collect();
        if colors.len() != players.len() {
            return false;
        }

        players.iter().all(|player| {
            let numbers: Vec<u8> = player.pieces().iter().map(|p| p.id().number).collect();
            player.pieces().len() == PIECES_PER_PLAYER as usize
                && numbers == (1..=PIECES_PER_PLAYER).collect::<Vec<_>>()
                && player.pieces().iter().all(|p| {
                    p.color() == player.color()
                        && (LinearPosition::BASE..=LinearPosition::HOME).contains(&p.position())
                })
        })
    }

    fn description() -> &'static str {
        "Each of 2-4 players owns exactly three pieces at legal positions"
    }
}
