//! Players and the pieces they own.

use crate::Color;
use crate::piece::{PIECES_PER_PLAYER, Piece, PieceId};
use serde::{Deserialize, Serialize};

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    name: String,
    pieces: Vec<Piece>,
}

impl Player {
    /// Creates a player with all pieces in base.
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        let pieces = (1..=PIECES_PER_PLAYER)
            .map(|number| Piece::new(PieceId::new(color, number)))
            .collect();
        Self {
            color,
            name: name.into(),
            pieces,
        }
    }

    /// Default display name for a seat ("Player 1" for seat 0).
    pub fn default_name(seat: usize) -> String {
        format!("Player {}", seat + 1)
    }

    /// Returns the player's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Returns the player's pieces.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Looks up one of this player's pieces.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    #[cfg(test)]
    pub(crate) fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut()
    }

    /// Number of pieces that reached home.
    pub fn home_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_home()).count()
    }

    /// True once every piece is home.
    pub fn has_won(&self) -> bool {
        self.pieces.iter().all(|p| p.is_home())
    }

    pub(crate) fn return_all_to_base(&mut self) {
        for piece in &mut self.pieces {
            piece.send_to_base();
        }
    }
}
