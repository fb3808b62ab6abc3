//! Super Ludo - pure crystal-ball Ludo game logic
//!
//! Two to four players race three pieces each around a shared 52-cell ring
//! and up a private home stretch. Instead of a die, every turn draws a
//! weighted crystal ball event: a normal roll, or one of five special
//! events that skip turns, grant extra turns, warp pieces or attack
//! opponents.
//!
//! # Architecture
//!
//! - **Board**: linear positions, ring geometry and safe cells
//! - **Events**: the crystal ball distribution and its generator
//! - **Engine**: the turn state machine, movement, capture and win rules
//! - **Snapshots**: read-only views for renderers and other collaborators
//! - **Invariants**: properties checked after every mutating operation
//!
//! # Example
//!
//! ```
//! use super_ludo::{Color, Event, PieceId, TurnEngine, TurnPhase};
//!
//! # fn example() -> Result<(), super_ludo::EngineError> {
//! let mut engine = TurnEngine::seeded(2, 42)?;
//!
//! engine.apply_event(Event::NormalRoll(6))?;
//! assert_eq!(engine.phase(), TurnPhase::AwaitingPieceSelection);
//!
//! let outcome = engine.select_piece(PieceId::new(Color::Red, 1))?;
//! println!("{}", outcome);
//! println!("{}", engine.status());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod color;
mod config;
mod engine;
mod error;
mod event;
mod outcome;
mod piece;
mod player;
mod setup;
mod snapshot;
mod state;

pub mod invariants;

// Crate-level exports - Board geometry
pub use board::{
    BoardCell, BoardTopology, DEFAULT_SAFE_OFFSETS, HOME_STRETCH_LEN, LinearPosition, RING_SIZE,
};

// Crate-level exports - Players and pieces
pub use color::Color;
pub use piece::{PIECES_PER_PLAYER, Piece, PieceId};
pub use player::Player;

// Crate-level exports - Crystal ball
pub use event::{ENTRY_ROLL, Event, EventGenerator, EventKind, EventWeights, MAX_ROLL};

// Crate-level exports - Engine
pub use engine::TurnEngine;
pub use outcome::MoveOutcome;
pub use setup::GameSetup;
pub use state::{GameState, SelectionPhase, TurnPhase};

// Crate-level exports - Snapshots
pub use snapshot::{GameSnapshot, PieceSnapshot, PlayerSnapshot};

// Crate-level exports - Configuration and errors
pub use config::{EngineConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{ConfigError, EngineError};
