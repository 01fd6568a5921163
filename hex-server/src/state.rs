//! Server state management
//!
//! The server only ever reads game state through a [`GameObserver`]; the game
//! itself runs elsewhere and publishes snapshots as turns complete.

use std::sync::atomic::{AtomicUsize, Ordering};

use hex_core::GameObserver;

/// Server-wide shared state
#[derive(Debug)]
pub struct ServerState {
    pub observer: GameObserver,
    /// Names of the players currently at the board, Red first
    pub players: [String; 2],
    games_completed: AtomicUsize,
}

impl ServerState {
    pub fn new(observer: GameObserver, red: impl Into<String>, blue: impl Into<String>) -> Self {
        Self {
            observer,
            players: [red.into(), blue.into()],
            games_completed: AtomicUsize::new(0),
        }
    }

    /// Called by whoever drives the games, once per finished game
    pub fn record_game_completed(&self) {
        self.games_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn games_completed(&self) -> usize {
        self.games_completed.load(Ordering::Relaxed)
    }
}
