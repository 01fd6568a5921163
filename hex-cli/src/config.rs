//! Game configuration: JSON file, overridden by command-line flags

use std::path::Path;

use anyhow::{Context, Result};
use hex_core::board::validate_dimension;
use hex_core::{ConnectionPlayer, Player, RandomPlayer, Side, DEFAULT_DIMENSION};
use serde::{Deserialize, Serialize};

use crate::human::HumanPlayer;

/// Who sits on one side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Reads moves from stdin
    Human,
    /// Uniformly random legal cell
    Random,
    /// Greedy connection-distance AI
    Connection,
}

impl PlayerKind {
    pub fn is_automated(self) -> bool {
        !matches!(self, PlayerKind::Human)
    }
}

/// Settings for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side, 9..=19
    pub dimension: usize,
    pub red: PlayerKind,
    pub blue: PlayerKind,
    /// Seed for automated players (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            red: PlayerKind::Human,
            blue: PlayerKind::Connection,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        dimension: Option<usize>,
        red: Option<PlayerKind>,
        blue: Option<PlayerKind>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(d) = dimension {
            self.dimension = d;
        }
        if let Some(r) = red {
            self.red = r;
        }
        if let Some(b) = blue {
            self.blue = b;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimension(self.dimension, self.dimension)?;
        Ok(())
    }

    pub fn kind_for(&self, side: Side) -> PlayerKind {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }
}

/// Build a player for `side`. Humans read from stdin and prompt on stdout.
pub fn build_player(kind: PlayerKind, side: Side, seed: u64) -> Box<dyn Player + Send> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::stdio(side)),
        PlayerKind::Random => Box::new(RandomPlayer::with_seed(side, seed)),
        PlayerKind::Connection => Box::new(ConnectionPlayer::with_seed(side, seed)),
    }
}
