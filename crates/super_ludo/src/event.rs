//! Crystal ball events and the weighted generator that draws them.
//!
//! The crystal ball replaces the die. One draw from `[0, 1)` picks an
//! event kind by half-open cumulative buckets; a normal roll then draws
//! its face uniformly from 1-6.

use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Highest face of a normal roll.
pub const MAX_ROLL: u8 = 6;

/// Face needed to bring a piece out of base.
pub const ENTRY_ROLL: u8 = 6;

/// Outcome of one crystal ball draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Ordinary move of 1-6 steps.
    NormalRoll(u8),
    /// The turn is forfeited.
    BlackHole,
    /// Send one unprotected opponent piece back to base.
    MeteorStrike,
    /// Jump one of your ring pieces to the next safe zone ahead.
    Wormhole,
    /// Roll again.
    SuperBoost,
    /// Teleport one opponent ring piece to a random ring cell.
    AlienInvasion,
}

/// Event kind without payload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum EventKind {
    /// See [`Event::NormalRoll`].
    NormalRoll,
    /// See [`Event::BlackHole`].
    BlackHole,
    /// See [`Event::MeteorStrike`].
    MeteorStrike,
    /// See [`Event::Wormhole`].
    Wormhole,
    /// See [`Event::SuperBoost`].
    SuperBoost,
    /// See [`Event::AlienInvasion`].
    AlienInvasion,
}

impl Event {
    /// Returns the payload-free kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::NormalRoll(_) => EventKind::NormalRoll,
            Event::BlackHole => EventKind::BlackHole,
            Event::MeteorStrike => EventKind::MeteorStrike,
            Event::Wormhole => EventKind::Wormhole,
            Event::SuperBoost => EventKind::SuperBoost,
            Event::AlienInvasion => EventKind::AlienInvasion,
        }
    }

    /// Short title for display.
    pub fn title(&self) -> &'static str {
        match self {
            Event::NormalRoll(_) => "Normal Roll",
            Event::BlackHole => "Black Hole",
            Event::MeteorStrike => "Meteor Strike",
            Event::Wormhole => "Wormhole",
            Event::SuperBoost => "Super Boost",
            Event::AlienInvasion => "Alien Invasion",
        }
    }

    /// One-line rules description.
    pub fn description(&self) -> &'static str {
        match self {
            Event::NormalRoll(_) => "Move one of your pieces forward by the rolled value.",
            Event::BlackHole => "You lose your turn.",
            Event::MeteorStrike => "Send an unprotected opponent piece back to base.",
            Event::Wormhole => "Jump one of your pieces to the next safe zone.",
            Event::SuperBoost => "You get an extra turn.",
            Event::AlienInvasion => "Teleport an opponent piece to a random spot on the ring.",
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::NormalRoll(v) => write!(f, "{} ({})", self.title(), v),
            _ => write!(f, "{}", self.title()),
        }
    }
}

/// Percentage weight of each event kind. Must sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWeights {
    /// Normal roll.
    pub normal_roll: u8,
    /// Black hole.
    pub black_hole: u8,
    /// Meteor strike.
    pub meteor_strike: u8,
    /// Wormhole.
    pub wormhole: u8,
    /// Super boost.
    pub super_boost: u8,
    /// Alien invasion.
    pub alien_invasion: u8,
}

impl EventWeights {
    /// Weights paired with their kinds, in bucket order.
    pub fn buckets(&self) -> [(EventKind, u8); 6] {
        [
            (EventKind::NormalRoll, self.normal_roll),
            (EventKind::BlackHole, self.black_hole),
            (EventKind::MeteorStrike, self.meteor_strike),
            (EventKind::Wormhole, self.wormhole),
            (EventKind::SuperBoost, self.super_boost),
            (EventKind::AlienInvasion, self.alien_invasion),
        ]
    }

    /// Sum of all weights.
    pub fn total(&self) -> u32 {
        self.buckets().iter().map(|(_, w)| *w as u32).sum()
    }

    /// Weight of one kind.
    pub fn weight(&self, kind: EventKind) -> u8 {
        self.buckets()
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, w)| *w)
            .unwrap_or(0)
    }

    /// Rejects weights that do not sum to 100.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.total();
        if total != 100 {
            return Err(ConfigError::new(format!(
                "event weights must sum to 100, got {}",
                total
            )));
        }
        Ok(())
    }
}

impl Default for EventWeights {
    fn default() -> Self {
        Self {
            normal_roll: 65,
            black_hole: 10,
            meteor_strike: 7,
            wormhole: 8,
            super_boost: 5,
            alien_invasion: 5,
        }
    }
}

/// Draws weighted crystal ball events.
///
/// The generator holds no randomness of its own; the caller passes the
/// random source so one seeded RNG can drive a whole game.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGenerator {
    weights: EventWeights,
    /// Upper (exclusive) boundary of each bucket in `[0, 1]`.
    boundaries: [(EventKind, f64); 6],
}

impl EventGenerator {
    /// Creates a generator from validated weights.
    #[instrument]
    pub fn new(weights: EventWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        let mut cumulative = 0u32;
        let boundaries = weights.buckets().map(|(kind, w)| {
            cumulative += w as u32;
            (kind, cumulative as f64 / 100.0)
        });
        Ok(Self {
            weights,
            boundaries,
        })
    }

    /// Returns the weights in use.
    pub fn weights(&self) -> &EventWeights {
        &self.weights
    }

    /// Maps a draw from `[0, 1)` to its bucket.
    ///
    /// A draw equal to a boundary belongs to the next bucket.
    pub fn classify(&self, roll: f64) -> EventKind {
        self.boundaries
            .iter()
            .find(|(_, upper)| roll < *upper)
            .map(|(kind, _)| *kind)
            .unwrap_or(EventKind::AlienInvasion)
    }

    /// Draws one event.
    #[instrument(skip(self, rng))]
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Event {
        let roll: f64 = rng.random();
        let event = match self.classify(roll) {
            EventKind::NormalRoll => Event::NormalRoll(rng.random_range(1..=MAX_ROLL)),
            EventKind::BlackHole => Event::BlackHole,
            EventKind::MeteorStrike => Event::MeteorStrike,
            EventKind::Wormhole => Event::Wormhole,
            EventKind::SuperBoost => Event::SuperBoost,
            EventKind::AlienInvasion => Event::AlienInvasion,
        };
        debug!(roll, %event, "Crystal ball drawn");
        event
    }
}

impl Default for EventGenerator {
    fn default() -> Self {
        let weights = EventWeights::default();
        Self {
            weights,
            boundaries: [
                (EventKind::NormalRoll, 0.65),
                (EventKind::BlackHole, 0.75),
                (EventKind::MeteorStrike, 0.82),
                (EventKind::Wormhole, 0.90),
                (EventKind::SuperBoost, 0.95),
                (EventKind::AlienInvasion, 1.0),
            ],
        }
    }
}
