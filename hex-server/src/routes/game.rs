//! Game endpoints: lifecycle summary and the raw snapshot

use axum::{extract::State, Json};
use hex_core::{GamePhase, GameSnapshot, Side};
use serde::Serialize;
use std::sync::Arc;

use crate::state::ServerState;

#[derive(Serialize)]
pub struct GameInfo {
    pub phase: GamePhase,
    pub is_game_over: bool,
    pub winner: Option<Side>,
    pub to_move: Option<Side>,
    pub moves_played: usize,
    pub red: String,
    pub blue: String,
}

/// Lifecycle summary of the game being played
pub async fn get_game(State(state): State<Arc<ServerState>>) -> Json<GameInfo> {
    let snapshot = state.observer.snapshot();

    Json(GameInfo {
        phase: snapshot.phase,
        is_game_over: snapshot.is_game_over(),
        winner: snapshot.winner,
        to_move: snapshot.to_move,
        moves_played: snapshot.moves_played,
        red: state.players[0].clone(),
        blue: state.players[1].clone(),
    })
}

/// Full snapshot as published by the game controller
pub async fn get_snapshot(State(state): State<Arc<ServerState>>) -> Json<GameSnapshot> {
    Json(state.observer.snapshot())
}
