//! Engine configuration.

use crate::board::{BoardTopology, DEFAULT_SAFE_OFFSETS};
use crate::error::ConfigError;
use crate::event::{EventGenerator, EventWeights};
use crate::player::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Smallest allowed table.
pub const MIN_PLAYERS: usize = 2;

/// Largest allowed table.
pub const MAX_PLAYERS: usize = 4;

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of seated players (2-4).
    #[serde(default = "default_player_count")]
    player_count: usize,

    /// Display names by seat. Missing names default to "Player N".
    #[serde(default)]
    player_names: Vec<String>,

    /// RNG seed. Absent means seeded from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Safe-cell offsets relative to each color's start.
    #[serde(default = "default_safe_offsets")]
    safe_offsets: Vec<u8>,

    /// Crystal ball weights in percent.
    #[serde(default)]
    event_weights: EventWeights,
}

#[instrument]
fn default_player_count() -> usize {
    MAX_PLAYERS
}

#[instrument]
fn default_safe_offsets() -> Vec<u8> {
    DEFAULT_SAFE_OFFSETS.to_vec()
}

impl EngineConfig {
    /// Creates a default configuration for the given table size.
    #[instrument]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Sets the table size.
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the player names.
    pub fn with_player_names(mut self, names: Vec<String>) -> Self {
        self.player_names = names;
        self
    }

    /// Sets the event weights.
    pub fn with_event_weights(mut self, weights: EventWeights) -> Self {
        self.event_weights = weights;
        self
    }

    /// Sets the safe-cell offsets.
    pub fn with_safe_offsets(mut self, offsets: Vec<u8>) -> Self {
        self.safe_offsets = offsets;
        self
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            player_count = config.player_count,
            seeded = config.seed.is_some(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks table size, names, safe layout and event weights.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::new(format!(
                "player_count must be between {} and {}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if self.player_names.len() > self.player_count {
            return Err(ConfigError::new(format!(
                "{} player names given for {} players",
                self.player_names.len(),
                self.player_count
            )));
        }
        self.topology()?;
        self.event_weights.validate()
    }

    /// Builds the board topology described by this config.
    pub fn topology(&self) -> Result<BoardTopology, ConfigError> {
        BoardTopology::new(self.safe_offsets.clone())
    }

    /// Builds the event generator described by this config.
    pub fn generator(&self) -> Result<EventGenerator, ConfigError> {
        EventGenerator::new(self.event_weights)
    }

    /// Name for the given seat, falling back to "Player N".
    pub fn name_for(&self, seat: usize) -> String {
        self.player_names
            .get(seat)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| Player::default_name(seat))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: default_player_count(),
            player_names: Vec::new(),
            seed: None,
            safe_offsets: default_safe_offsets(),
            event_weights: EventWeights::default(),
        }
    }
}
