//! Board endpoint: current owner of every cell

use axum::{extract::State, Json};
use hex_core::{Side, HEX_DIRECTIONS};
use serde::Serialize;
use std::sync::Arc;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct BoardInfo {
    pub dimension: usize,
    /// `rows[r][c]` is the owner of cell (r, c), `null` when unclaimed
    pub rows: Vec<Vec<Option<Side>>>,
    pub directions: Vec<[isize; 2]>,
    pub moves_played: usize,
}

/// Get the latest published board
pub async fn get_board(State(state): State<Arc<ServerState>>) -> Json<BoardInfo> {
    let snapshot = state.observer.snapshot();
    let rows = snapshot
        .cells
        .chunks(snapshot.dimension.max(1))
        .map(<[Option<Side>]>::to_vec)
        .collect();

    Json(BoardInfo {
        dimension: snapshot.dimension,
        rows,
        directions: HEX_DIRECTIONS.iter().map(|&(dr, dc)| [dr, dc]).collect(),
        moves_played: snapshot.moves_played,
    })
}
