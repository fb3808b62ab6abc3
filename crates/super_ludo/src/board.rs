//! Static board geometry.
//!
//! Every piece measures its progress with a per-color [`LinearPosition`].
//! Movement rules only ever compare linear positions; the shared ring is
//! consulted through [`BoardTopology`] when two colors must agree on a
//! cell, which happens for capture and safe-zone checks.

use crate::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use tracing::instrument;

/// Number of cells on the shared ring.
pub const RING_SIZE: u8 = 52;

/// Number of cells on each color's home stretch.
pub const HOME_STRETCH_LEN: u8 = 5;

/// Linear offsets of safe cells relative to each color's start, by default.
pub const DEFAULT_SAFE_OFFSETS: [u8; 2] = [0, 8];

/// A piece's progress along its own color's path.
///
/// - `-1`: in base
/// - `0..=51`: on the shared ring, `0` being the color's start cell
/// - `52..=56`: on the color's home stretch
/// - `57`: home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct LinearPosition(i8);

impl LinearPosition {
    /// The base (not yet entered).
    pub const BASE: LinearPosition = LinearPosition(-1);
    /// The color's own start cell.
    pub const START: LinearPosition = LinearPosition(0);
    /// Last ring cell before the home stretch.
    pub const LAST_RING: LinearPosition = LinearPosition(RING_SIZE as i8 - 1);
    /// Home (terminal).
    pub const HOME: LinearPosition = LinearPosition((RING_SIZE + HOME_STRETCH_LEN) as i8);

    /// Creates a position, returning `None` outside `{-1} ∪ [0, 57]`.
    pub fn new(value: i16) -> Option<Self> {
        if value >= Self::BASE.0 as i16 && value <= Self::HOME.0 as i16 {
            Some(Self(value as i8))
        } else {
            None
        }
    }

    /// Returns the raw coordinate.
    pub fn value(self) -> i16 {
        self.0 as i16
    }

    /// True while the piece waits in base.
    pub fn is_in_base(self) -> bool {
        self == Self::BASE
    }

    /// True once the piece is home.
    pub fn is_home(self) -> bool {
        self == Self::HOME
    }

    /// True on the shared ring (`0..=51`).
    pub fn is_on_ring(self) -> bool {
        (Self::START.0..=Self::LAST_RING.0).contains(&self.0)
    }

    /// True on the color's home stretch (`52..=56`).
    pub fn is_on_home_stretch(self) -> bool {
        self.0 > Self::LAST_RING.0 && self.0 < Self::HOME.0
    }

    /// Steps still needed to land exactly on home, or `None` from base.
    pub fn steps_to_home(self) -> Option<u8> {
        if self.is_in_base() {
            None
        } else {
            Some((Self::HOME.0 - self.0) as u8)
        }
    }

    /// Advances by `steps`, returning `None` if that would pass home.
    ///
    /// Pieces in base never advance; entering the board is a separate rule.
    pub fn advanced_by(self, steps: u8) -> Option<Self> {
        if self.is_in_base() {
            return None;
        }
        Self::new(self.value() + steps as i16)
    }
}

impl TryFrom<i16> for LinearPosition {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("linear position {} out of range", value))
    }
}

impl From<LinearPosition> for i16 {
    fn from(pos: LinearPosition) -> Self {
        pos.value()
    }
}

impl std::fmt::Display for LinearPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a piece sits on the physical board, for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardCell {
    /// In the color's base.
    Base(Color),
    /// Absolute shared ring cell (0-51).
    Ring(u8),
    /// Step on the color's home stretch (0-4, 0 nearest the ring).
    HomeStretch {
        /// Owner of the stretch.
        color: Color,
        /// Step index.
        step: u8,
    },
    /// The color's home.
    Home(Color),
}

/// Pure lookup of board geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTopology {
    safe_offsets: Vec<u8>,
}

impl BoardTopology {
    /// Creates a topology with safe cells at the given per-color offsets.
    ///
    /// Offsets must lie on the ring and include the start cell (0).
    #[instrument]
    pub fn new(safe_offsets: Vec<u8>) -> Result<Self, ConfigError> {
        if let Some(bad) = safe_offsets.iter().find(|o| **o >= RING_SIZE) {
            return Err(ConfigError::new(format!(
                "safe offset {} is outside the ring (0-{})",
                bad,
                RING_SIZE - 1
            )));
        }
        if !safe_offsets.contains(&0) {
            return Err(ConfigError::new(
                "safe offsets must include the start cell (0)".to_string(),
            ));
        }
        let mut safe_offsets = safe_offsets;
        safe_offsets.sort_unstable();
        safe_offsets.dedup();
        Ok(Self { safe_offsets })
    }

    /// Returns the configured safe offsets, sorted.
    pub fn safe_offsets(&self) -> &[u8] {
        &self.safe_offsets
    }

    /// Absolute ring cell where the color enters the board.
    pub fn start_offset(&self, color: Color) -> u8 {
        color.seat() as u8 * (RING_SIZE / Color::COUNT as u8)
    }

    /// Absolute ring cell for a linear position, if it is on the ring.
    pub fn ring_cell(&self, color: Color, pos: LinearPosition) -> Option<u8> {
        if pos.is_on_ring() {
            Some((self.start_offset(color) + pos.value() as u8) % RING_SIZE)
        } else {
            None
        }
    }

    /// True if the absolute ring cell is a safe zone for any color.
    pub fn is_safe_cell(&self, cell: u8) -> bool {
        Color::ALL.iter().any(|c| {
            self.safe_offsets
                .iter()
                .any(|o| (self.start_offset(*c) + o) % RING_SIZE == cell)
        })
    }

    /// True if the piece's cell is protected from capture.
    ///
    /// Evaluated on the absolute ring cell: a cell that is safe for one
    /// color protects every piece standing on it.
    pub fn is_safe_zone(&self, color: Color, pos: LinearPosition) -> bool {
        self.ring_cell(color, pos)
            .is_some_and(|cell| self.is_safe_cell(cell))
    }

    /// All absolute safe ring cells, ascending.
    pub fn safe_cells(&self) -> Vec<u8> {
        (0..RING_SIZE).filter(|c| self.is_safe_cell(*c)).collect()
    }

    /// Nearest safe linear position strictly ahead on the ring.
    ///
    /// Does not wrap and never targets the home stretch.
    pub fn next_safe_zone(&self, color: Color, pos: LinearPosition) -> Option<LinearPosition> {
        if !pos.is_on_ring() {
            return None;
        }
        (pos.value() + 1..=LinearPosition::LAST_RING.value())
            .filter_map(LinearPosition::new)
            .find(|p| self.is_safe_zone(color, *p))
    }

    /// Maps a linear position onto the physical board.
    pub fn to_absolute_cell(&self, color: Color, pos: LinearPosition) -> BoardCell {
        if pos.is_in_base() {
            BoardCell::Base(color)
        } else if pos.is_home() {
            BoardCell::Home(color)
        } else if let Some(cell) = self.ring_cell(color, pos) {
            BoardCell::Ring(cell)
        } else {
            BoardCell::HomeStretch {
                color,
                step: (pos.value() - RING_SIZE as i16) as u8,
            }
        }
    }
}

impl Default for BoardTopology {
    fn default() -> Self {
        Self {
            safe_offsets: DEFAULT_SAFE_OFFSETS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: i16) -> LinearPosition {
        LinearPosition::new(v).unwrap()
    }

    #[test]
    fn test_position_range() {
        assert!(LinearPosition::new(-2).is_none());
        assert!(LinearPosition::new(58).is_none());
        assert!(pos(-1).is_in_base());
        assert!(pos(0).is_on_ring());
        assert!(pos(51).is_on_ring());
        assert!(pos(52).is_on_home_stretch());
        assert!(pos(56).is_on_home_stretch());
        assert!(pos(57).is_home());
    }

    #[test]
    fn test_advance_exact_and_overshoot() {
        assert_eq!(pos(55).advanced_by(2), Some(LinearPosition::HOME));
        assert_eq!(pos(53).advanced_by(5), None);
        assert_eq!(LinearPosition::BASE.advanced_by(6), None);
        assert_eq!(pos(53).steps_to_home(), Some(4));
    }

    #[test]
    fn test_start_offsets_evenly_spaced() {
        let board = BoardTopology::default();
        assert_eq!(board.start_offset(Color::Red), 0);
        assert_eq!(board.start_offset(Color::Green), 13);
        assert_eq!(board.start_offset(Color::Yellow), 26);
        assert_eq!(board.start_offset(Color::Blue), 39);
    }

    #[test]
    fn test_default_layout_has_eight_safe_cells() {
        let board = BoardTopology::default();
        assert_eq!(board.safe_cells(), vec![0, 8, 13, 21, 26, 34, 39, 47]);
    }

    #[test]
    fn test_safe_zone_is_shared_between_colors() {
        let board = BoardTopology::default();
        // Green's start is absolute 13, which is Red's linear 13.
        assert!(board.is_safe_zone(Color::Red, pos(13)));
        assert!(board.is_safe_zone(Color::Green, pos(0)));
        // Blue's linear 13 wraps to absolute 0, Red's start.
        assert!(board.is_safe_zone(Color::Blue, pos(13)));
        assert!(!board.is_safe_zone(Color::Red, pos(5)));
        assert!(!board.is_safe_zone(Color::Red, pos(53)));
    }

    #[test]
    fn test_ring_cell_wraps() {
        let board = BoardTopology::default();
        assert_eq!(board.ring_cell(Color::Blue, pos(20)), Some(7));
        assert_eq!(board.ring_cell(Color::Blue, pos(52)), None);
    }

    #[test]
    fn test_next_safe_zone() {
        let board = BoardTopology::default();
        assert_eq!(board.next_safe_zone(Color::Red, pos(0)), Some(pos(8)));
        assert_eq!(board.next_safe_zone(Color::Red, pos(8)), Some(pos(13)));
        assert_eq!(board.next_safe_zone(Color::Red, pos(46)), Some(pos(47)));
        assert_eq!(board.next_safe_zone(Color::Red, pos(47)), None);
        assert_eq!(board.next_safe_zone(Color::Red, pos(53)), None);
    }

    #[test]
    fn test_to_absolute_cell() {
        let board = BoardTopology::default();
        assert_eq!(
            board.to_absolute_cell(Color::Green, LinearPosition::BASE),
            BoardCell::Base(Color::Green)
        );
        assert_eq!(board.to_absolute_cell(Color::Green, pos(3)), BoardCell::Ring(16));
        assert_eq!(
            board.to_absolute_cell(Color::Green, pos(54)),
            BoardCell::HomeStretch {
                color: Color::Green,
                step: 2
            }
        );
        assert_eq!(
            board.to_absolute_cell(Color::Green, LinearPosition::HOME),
            BoardCell::Home(Color::Green)
        );
    }

    #[test]
    fn test_invalid_safe_offsets_rejected() {
        assert!(BoardTopology::new(vec![8]).is_err());
        assert!(BoardTopology::new(vec![0, 52]).is_err());
        let board = BoardTopology::new(vec![8, 0, 8]).unwrap();
        assert_eq!(board.safe_offsets(), &[0, 8]);
    }
}
