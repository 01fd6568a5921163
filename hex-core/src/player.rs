//! Moves and the player capability the game controller drives

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

/// A request to claim one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub column: usize,
    pub side: Side,
}

impl Move {
    pub const fn new(row: usize, column: usize, side: Side) -> Self {
        Self { row, column, side }
    }
}

/// Anything that can take a turn: a human input adapter, an AI, a script.
///
/// The controller asks for exactly one move at a time and waits for the
/// answer before asking again. `request_move` may block for as long as it
/// needs; timeouts are the implementation's business.
pub trait Player {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// The side this player claims as. Must not change during a game.
    fn side(&self) -> Side;

    /// Produce the next move for the given position.
    ///
    /// Moves onto claimed or off-board cells are rejected and the player is
    /// asked again. An `Err` means no move will ever come, and abandons the game.
    fn request_move(&mut self, board: &Board) -> anyhow::Result<Move>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn side(&self) -> Side {
        (**self).side()
    }

    fn request_move(&mut self, board: &Board) -> anyhow::Result<Move> {
        (**self).request_move(board)
    }
}
