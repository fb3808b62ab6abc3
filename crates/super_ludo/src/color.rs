//! Player colors.

use serde::{Deserialize, Serialize};

/// One of the four fixed player colors.
///
/// Declaration order is seating order: players are created Red, Green,
/// Yellow, Blue, and turns pass in that order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumCount,
    strum::Display,
)]
pub enum Color {
    /// Red, seat 0.
    Red,
    /// Green, seat 1.
    Green,
    /// Yellow, seat 2.
    Yellow,
    /// Blue, seat 3.
    Blue,
}

impl Color {
    /// All colors in seating order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Returns the seat index of this color (0-3).
    pub fn seat(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Blue => 3,
        }
    }

    /// Returns the color sitting at the given seat.
    pub fn from_seat(seat: usize) -> Option<Self> {
        Self::ALL.get(seat).copied()
    }
}
