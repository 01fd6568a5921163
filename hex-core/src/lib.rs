//! Hex Core - Game engine and AI
//!
//! This crate provides the core game logic for Hex:
//! - Board geometry (rhombic N x N grid, six-neighbour adjacency)
//! - Incremental win detection with per-side union-find
//! - Game controller driving two players turn by turn
//! - Snapshot publication for passive observers
//! - Connection-distance evaluation and automated players

pub mod board;
pub mod connectivity;
pub mod error;
pub mod player;
pub mod observer;
pub mod game;
pub mod eval;
pub mod ai;

// Re-exports for convenient access
pub use board::{
    Board, Orientation, Side, Tile, DEFAULT_DIMENSION, HEX_DIRECTIONS, MAX_DIMENSION,
    MIN_DIMENSION,
};
pub use connectivity::{ConnectivityTracker, DisjointSet};
pub use error::{ClaimError, GameError, IllegalMove};
pub use player::{Move, Player};
pub use observer::{GameObserver, GamePhase, GameSnapshot};
pub use game::{GameOutcome, HexGame, TurnOutcome};
pub use eval::{connection_distance, connection_distance_after};
pub use ai::{ConnectionPlayer, RandomPlayer, ScriptedPlayer};
