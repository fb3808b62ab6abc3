//! Error types for the rules engine.

use crate::PieceId;
use derive_more::{Display, Error};
use tracing::instrument;

/// Error returned when an engine operation is rejected.
///
/// Every rejection leaves the game state untouched and does not consume
/// the turn.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineError {
    /// Player count outside 2-4.
    #[display("Invalid player count {}: must be between 2 and 4", _0)]
    InvalidPlayerCount(usize),

    /// Operation invoked outside the phase it requires.
    #[display("Cannot {} while {}", operation, phase)]
    WrongPhase {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the engine was in.
        phase: &'static str,
    },

    /// The piece is not eligible for the pending event.
    #[display("Piece {} cannot be selected for this event", _0)]
    IneligibleSelection(PieceId),

    /// A forced normal roll outside 1-6.
    #[display("Invalid roll value {}: must be between 1 and 6", _0)]
    InvalidRoll(u8),

    /// No player sits at the given index.
    #[display("No player at index {}", _0)]
    UnknownPlayer(usize),

    /// No such piece in the game.
    #[display("No piece {} in this game", _0)]
    UnknownPiece(PieceId),

    /// A placement outside `{-1} ∪ [0, 57]`.
    #[display("Linear position {} is outside the board", _0)]
    InvalidPosition(i16),

    /// An invariant was violated.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// The engine configuration is invalid.
    #[display("{}", _0)]
    Config(ConfigError),
}

impl std::error::Error for EngineError {}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
