//! Rhombic hex board geometry and tile ownership

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClaimError, GameError};

/// Smallest allowed board side
pub const MIN_DIMENSION: usize = 9;

/// Largest allowed board side
pub const MAX_DIMENSION: usize = 19;

/// Board side used when none is given
pub const DEFAULT_DIMENSION: usize = 11;

/// Neighbour offsets (d_row, d_column) on the rhombic grid.
/// The last two are the hex "diagonals".
pub const HEX_DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, -1),
];

// ============================================================================
// SIDES
// ============================================================================

/// The two claiming sides. Red connects top to bottom, Blue left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red = 0,
    Blue = 1,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Which pair of board edges this side has to connect
    pub fn orientation(self) -> Orientation {
        match self {
            Side::Red => Orientation::TopBottom,
            Side::Blue => Orientation::LeftRight,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "Red"),
            Side::Blue => write!(f, "Blue"),
        }
    }
}

/// A pair of opposite board edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Entry edge is row 0, exit edge is the last row
    TopBottom,
    /// Entry edge is column 0, exit edge is the last column
    LeftRight,
}

impl Orientation {
    pub fn is_entry(self, row: usize, column: usize) -> bool {
        match self {
            Orientation::TopBottom => row == 0,
            Orientation::LeftRight => column == 0,
        }
    }

    pub fn is_exit(self, row: usize, column: usize, dimension: usize) -> bool {
        match self {
            Orientation::TopBottom => row + 1 == dimension,
            Orientation::LeftRight => column + 1 == dimension,
        }
    }
}

// ============================================================================
// TILES
// ============================================================================

/// A single cell of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    row: usize,
    column: usize,
    owner: Option<Side>,
}

impl Tile {
    fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            owner: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn owner(&self) -> Option<Side> {
        self.owner
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square N x N grid of tiles, stored row-major
#[derive(Clone, Debug)]
pub struct Board {
    dimension: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an empty board. Width and height must be equal and within
    /// [`MIN_DIMENSION`]..=[`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        validate_dimension(width, height)?;

        let tiles = (0..width * width)
            .map(|idx| Tile::new(idx / width, idx % width))
            .collect();

        Ok(Self {
            dimension: width,
            tiles,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        row < self.dimension && column < self.dimension
    }

    /// Row-major index of a cell. Caller guarantees bounds.
    pub(crate) fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.dimension + column
    }

    fn checked_index(&self, row: usize, column: usize) -> Result<usize, ClaimError> {
        if self.contains(row, column) {
            Ok(self.index_of(row, column))
        } else {
            Err(ClaimError::InvalidCoordinate {
                row,
                column,
                dimension: self.dimension,
            })
        }
    }

    pub fn tile(&self, row: usize, column: usize) -> Result<&Tile, ClaimError> {
        let idx = self.checked_index(row, column)?;
        Ok(&self.tiles[idx])
    }

    pub fn owner(&self, row: usize, column: usize) -> Result<Option<Side>, ClaimError> {
        self.tile(row, column).map(Tile::owner)
    }

    /// Claim an unclaimed tile for `side`. This is the only way a tile changes owner
    /// during play.
    pub fn claim(&mut self, row: usize, column: usize, side: Side) -> Result<(), ClaimError> {
        let idx = self.checked_index(row, column)?;
        let tile = &mut self.tiles[idx];

        if let Some(owner) = tile.owner {
            return Err(ClaimError::AlreadyClaimed { row, column, owner });
        }

        tile.owner = Some(side);
        Ok(())
    }

    /// Set every tile back to unclaimed
    pub fn reset_tiles(&mut self) {
        for tile in &mut self.tiles {
            tile.owner = None;
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Unclaimed tiles in row-major order
    pub fn unclaimed(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| !t.is_claimed())
    }

    pub fn claimed_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_claimed()).count()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(Tile::is_claimed)
    }

    /// Owners of every cell, row-major
    pub fn cells(&self) -> Vec<Option<Side>> {
        self.tiles.iter().map(Tile::owner).collect()
    }

    /// In-bounds hex neighbours of a cell
    pub fn neighbors(&self, row: usize, column: usize) -> impl Iterator<Item = (usize, usize)> {
        let dimension = self.dimension as isize;
        let (row, column) = (row as isize, column as isize);

        HEX_DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let (r, c) = (row + dr, column + dc);
            if (0..dimension).contains(&r) && (0..dimension).contains(&c) {
                Some((r as usize, c as usize))
            } else {
                None
            }
        })
    }
}

/// Check a requested board size
pub fn validate_dimension(width: usize, height: usize) -> Result<(), GameError> {
    if width != height || !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width) {
        return Err(GameError::InvalidDimension { width, height });
    }
    Ok(())
}
