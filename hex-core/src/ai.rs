//! Automated players

use std::collections::VecDeque;

use anyhow::bail;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Side};
use crate::eval::{connection_distance_after, BLOCKED};
use crate::player::{Move, Player};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Noise scale for tie-breaking between equally scored cells
const NOISE_SCALE: f32 = 0.5;

// ============================================================================
// RANDOM PLAYER
// ============================================================================

/// Claims a uniformly random unclaimed cell
pub struct RandomPlayer {
    name: String,
    side: Side,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(side: Side) -> Self {
        Self::with_seed(side, 42)
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self {
            name: format!("random-{}", side).to_lowercase(),
            side,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn request_move(&mut self, board: &Board) -> anyhow::Result<Move> {
        match board.unclaimed().choose(&mut self.rng) {
            Some(tile) => Ok(Move::new(tile.row(), tile.column(), self.side)),
            None => bail!("no unclaimed cells left"),
        }
    }
}

// ============================================================================
// CONNECTION PLAYER
// ============================================================================

/// Greedy player: shortens its own connection distance while lengthening the
/// opponent's, one ply deep
pub struct ConnectionPlayer {
    name: String,
    side: Side,
    rng: ChaCha8Rng,
}

impl ConnectionPlayer {
    pub fn new(side: Side) -> Self {
        Self::with_seed(side, 42)
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self {
            name: format!("connection-{}", side).to_lowercase(),
            side,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Best cell for the side to claim, `None` on a full board
    pub fn best_cell(&mut self, board: &Board) -> Option<(usize, usize)> {
        let me = self.side;
        let opponent = me.opponent();
        let mut best: Option<((usize, usize), f32)> = None;

        for tile in board.unclaimed() {
            let (r, c) = (tile.row(), tile.column());

            let own = connection_distance_after(board, me, r, c, me).unwrap_or(BLOCKED);
            if own == 0 {
                return Some((r, c));
            }
            let theirs = connection_distance_after(board, opponent, r, c, me).unwrap_or(BLOCKED);

            let noise = self.rng.gen::<f32>() * NOISE_SCALE;
            let score = theirs.min(BLOCKED) as f32 - own as f32 + noise;

            if best.map_or(true, |(_, s)| score > s) {
                best = Some(((r, c), score));
            }
        }

        best.map(|(cell, _)| cell)
    }
}

impl Player for ConnectionPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn request_move(&mut self, board: &Board) -> anyhow::Result<Move> {
        match self.best_cell(board) {
            Some((row, column)) => Ok(Move::new(row, column, self.side)),
            None => bail!("no unclaimed cells left"),
        }
    }
}

// ============================================================================
// SCRIPTED PLAYER
// ============================================================================

/// Replays a fixed list of cells, then fails. Rejected cells are consumed too.
pub struct ScriptedPlayer {
    name: String,
    side: Side,
    cells: VecDeque<(usize, usize)>,
}

impl ScriptedPlayer {
    pub fn new(
        name: impl Into<String>,
        side: Side,
        cells: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        Self {
            name: name.into(),
            side,
            cells: cells.into_iter().collect(),
        }
    }

    /// Cells not yet played
    pub fn remaining(&self) -> usize {
        self.cells.len()
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }

    fn request_move(&mut self, _board: &Board) -> anyhow::Result<Move> {
        match self.cells.pop_front() {
            Some((row, column)) => Ok(Move::new(row, column, self.side)),
            None => bail!("script for '{}' is exhausted", self.name),
        }
    }
}
