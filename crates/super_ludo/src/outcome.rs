//! Results of resolving a selection.

use crate::board::LinearPosition;
use crate::piece::PieceId;
use serde::{Deserialize, Serialize};

/// What happened when a selection was resolved.
///
/// Every variant ends the turn. [`MoveOutcome::Overshoot`] and
/// [`MoveOutcome::NoSafeZoneAhead`] resolve without moving anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// A six brought the piece from base onto its start cell.
    Entered {
        /// Moved piece.
        piece: PieceId,
    },
    /// Ordinary move along the path.
    Moved {
        /// Moved piece.
        piece: PieceId,
        /// Position before the move.
        from: LinearPosition,
        /// Position after the move.
        to: LinearPosition,
        /// Opponent pieces knocked back to base.
        captured: Vec<PieceId>,
    },
    /// The piece landed exactly on home.
    ReachedHome {
        /// Moved piece.
        piece: PieceId,
        /// Position before the move.
        from: LinearPosition,
    },
    /// The roll would pass home; the piece stays.
    Overshoot {
        /// Selected piece.
        piece: PieceId,
        /// Where it stays.
        at: LinearPosition,
        /// Value rolled.
        rolled: u8,
        /// Exact value needed to reach home.
        needed: u8,
    },
    /// Wormhole jump to the next safe zone.
    Warped {
        /// Moved piece.
        piece: PieceId,
        /// Position before the jump.
        from: LinearPosition,
        /// Safe zone landed on.
        to: LinearPosition,
        /// Opponent pieces knocked back to base.
        captured: Vec<PieceId>,
    },
    /// Wormhole with no safe zone left on the ring ahead.
    NoSafeZoneAhead {
        /// Selected piece.
        piece: PieceId,
    },
    /// Meteor strike sent an opponent piece home to base.
    SentToBase {
        /// Struck piece.
        piece: PieceId,
        /// Position it was struck at.
        from: LinearPosition,
    },
    /// Alien invasion teleported an opponent piece.
    Relocated {
        /// Teleported piece.
        piece: PieceId,
        /// Position before.
        from: LinearPosition,
        /// Random ring position after.
        to: LinearPosition,
        /// Pieces knocked back to base at the destination.
        captured: Vec<PieceId>,
    },
}

impl MoveOutcome {
    /// The selected piece.
    pub fn piece(&self) -> PieceId {
        match self {
            MoveOutcome::Entered { piece }
            | MoveOutcome::Moved { piece, .. }
            | MoveOutcome::ReachedHome { piece, .. }
            | MoveOutcome::Overshoot { piece, .. }
            | MoveOutcome::Warped { piece, .. }
            | MoveOutcome::NoSafeZoneAhead { piece }
            | MoveOutcome::SentToBase { piece, .. }
            | MoveOutcome::Relocated { piece, .. } => *piece,
        }
    }

    /// Pieces captured as a side effect.
    pub fn captured(&self) -> &[PieceId] {
        match self {
            MoveOutcome::Moved { captured, .. }
            | MoveOutcome::Warped { captured, .. }
            | MoveOutcome::Relocated { captured, .. } => captured,
            _ => &[],
        }
    }

    /// True if the resolution left the board unchanged.
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Overshoot { .. } | MoveOutcome::NoSafeZoneAhead { .. }
        )
    }
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Entered { piece } => {
                write!(f, "Piece {} moved from base to its start position.", piece)?
            }
            MoveOutcome::Moved { piece, from, to, .. } => write!(
                f,
                "Piece {} moved {} spaces.",
                piece,
                to.value() - from.value()
            )?,
            MoveOutcome::ReachedHome { piece, .. } => write!(f, "Piece {} reached home!", piece)?,
            MoveOutcome::Overshoot { needed, .. } => write!(
                f,
                "You need an exact count to reach home ({} needed).",
                needed
            )?,
            MoveOutcome::Warped { piece, .. } => {
                write!(f, "Piece {} jumped to the next safe zone!", piece)?
            }
            MoveOutcome::NoSafeZoneAhead { piece } => write!(
                f,
                "No safe zone found ahead. Piece {} stays in place.",
                piece
            )?,
            MoveOutcome::SentToBase { piece, .. } => {
                write!(f, "Opponent's piece {} sent back to base!", piece)?
            }
            MoveOutcome::Relocated { piece, .. } => write!(
                f,
                "Opponent's piece {} teleported to a random location!",
                piece
            )?,
        }
        for captured in self.captured() {
            write!(f, " Piece {} sent back to base!", captured)?;
        }
        Ok(())
    }
}
