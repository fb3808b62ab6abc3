//! Pieces and their status predicates.

use crate::Color;
use crate::board::{BoardTopology, LinearPosition};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Pieces each player owns.
pub const PIECES_PER_PLAYER: u8 = 3;

/// Identifies a piece by owner color and number (1-3).
///
/// Ownership is carried in the id itself; there are no references back
/// to the owning player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct PieceId {
    /// Owning color.
    pub owner: Color,
    /// Piece number within the owner's set (1-3).
    pub number: u8,
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.owner, self.number)
    }
}

/// A single piece on (or off) the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    position: LinearPosition,
}

impl Piece {
    /// Creates a piece waiting in base.
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            position: LinearPosition::BASE,
        }
    }

    /// Returns the piece id.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the owning color.
    pub fn color(&self) -> Color {
        self.id.owner
    }

    /// Returns the current linear position.
    pub fn position(&self) -> LinearPosition {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: LinearPosition) {
        self.position = position;
    }

    pub(crate) fn send_to_base(&mut self) {
        self.position = LinearPosition::BASE;
    }

    /// True while in base.
    pub fn is_in_base(&self) -> bool {
        self.position.is_in_base()
    }

    /// True once home.
    pub fn is_home(&self) -> bool {
        self.position.is_home()
    }

    /// True on the shared ring.
    pub fn is_on_ring(&self) -> bool {
        self.position.is_on_ring()
    }

    /// True on the home stretch.
    pub fn is_on_home_stretch(&self) -> bool {
        self.position.is_on_home_stretch()
    }

    /// True if an opponent could knock this piece back to base.
    pub fn is_capturable(&self, board: &BoardTopology) -> bool {
        self.is_on_ring() && !board.is_safe_zone(self.color(), self.position)
    }

    /// Absolute ring cell, if on the ring.
    pub fn ring_cell(&self, board: &BoardTopology) -> Option<u8> {
        board.ring_cell(self.color(), self.position)
    }
}
