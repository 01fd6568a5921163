//! Hex CLI support library
//!
//! Pieces of the `hex` binary that are worth testing on their own:
//! - Game configuration files
//! - The stdin human player adapter
//! - Text rendering of snapshots

pub mod config;
pub mod human;
pub mod render;

pub use config::{build_player, GameConfig, PlayerKind};
pub use human::{parse_cell, HumanPlayer};
pub use render::{render_snapshot, status_line};
