//! Error types for board, move and game-state failures

use thiserror::Error;

use crate::board::{Side, MAX_DIMENSION, MIN_DIMENSION};

/// Why a single claim on the board was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    #[error("cell ({row}, {column}) is outside the {dimension}x{dimension} board")]
    InvalidCoordinate {
        row: usize,
        column: usize,
        dimension: usize,
    },

    #[error("cell ({row}, {column}) is already claimed by {owner}")]
    AlreadyClaimed {
        row: usize,
        column: usize,
        owner: Side,
    },
}

/// Why a move produced by a player was not applied.
///
/// These never leave the turn loop: the player is asked again.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("move claims as {found}, but it is {expected}'s turn")]
    WrongSide { expected: Side, found: Side },

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// Errors surfaced to whoever drives a [`HexGame`](crate::HexGame)
#[derive(Debug, Error)]
pub enum GameError {
    /// Configuration: board must be square with a side in the allowed range
    #[error(
        "board must be square with a side between {} and {}, got {width}x{height}",
        MIN_DIMENSION,
        MAX_DIMENSION
    )]
    InvalidDimension { width: usize, height: usize },

    /// Configuration: player 1 claims as Red, player 2 as Blue
    #[error("player {player} must claim as {expected}, but claims as {found}")]
    SideMismatch {
        player: u8,
        expected: Side,
        found: Side,
    },

    #[error("the game has already been started, reset it first")]
    AlreadyStarted,

    #[error("the game is not running")]
    NotRunning,

    #[error("the game cannot be reset because it has not yet been completed")]
    NotYetCompleted,

    /// The player could not produce a move at all; the game was abandoned
    #[error("{side} player '{name}' failed to produce a move")]
    PlayerFailed {
        side: Side,
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
