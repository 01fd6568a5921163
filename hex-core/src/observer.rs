//! Read-only views of a game for renderers and other passive consumers
//!
//! The controller replaces the published [`GameSnapshot`] wholesale after each
//! completed turn, so a reader on another thread only ever sees fully applied
//! moves.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::board::{Board, Side};

/// Lifecycle of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    Running,
    Ended,
}

/// Immutable picture of a game after some number of applied moves
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub dimension: usize,
    /// Owner of every cell, row-major
    pub cells: Vec<Option<Side>>,
    pub phase: GamePhase,
    pub winner: Option<Side>,
    /// Side to move, while running
    pub to_move: Option<Side>,
    pub moves_played: usize,
}

impl GameSnapshot {
    pub(crate) fn capture(
        board: &Board,
        phase: GamePhase,
        winner: Option<Side>,
        to_move: Option<Side>,
        moves_played: usize,
    ) -> Self {
        Self {
            dimension: board.dimension(),
            cells: board.cells(),
            phase,
            winner,
            to_move,
            moves_played,
        }
    }

    /// Owner of a cell, `None` when unclaimed or out of range
    pub fn owner(&self, row: usize, column: usize) -> Option<Side> {
        if row >= self.dimension || column >= self.dimension {
            return None;
        }
        self.cells[row * self.dimension + column]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }
}

/// Cloneable handle that can read the latest snapshot from any thread
#[derive(Clone, Debug)]
pub struct GameObserver {
    shared: Arc<RwLock<GameSnapshot>>,
}

impl GameObserver {
    pub(crate) fn new(shared: Arc<RwLock<GameSnapshot>>) -> Self {
        Self { shared }
    }

    /// Copy of the most recently published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.shared
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.shared.read().unwrap_or_else(PoisonError::into_inner).phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase() == GamePhase::Ended
    }

    pub fn winner(&self) -> Option<Side> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner).winner
    }
}

/// Writer half, owned by the controller
#[derive(Debug)]
pub(crate) struct SnapshotPublisher {
    shared: Arc<RwLock<GameSnapshot>>,
}

impl SnapshotPublisher {
    pub(crate) fn new(initial: GameSnapshot) -> Self {
        Self {
            shared: Arc::new(RwLock::new(initial)),
        }
    }

    pub(crate) fn publish(&self, snapshot: GameSnapshot) {
        *self.shared.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub(crate) fn observer(&self) -> GameObserver {
        GameObserver::new(Arc::clone(&self.shared))
    }
}
