//! Plain-text rendering of a game snapshot
//!
//! Rows are shifted one column right per row so the grid reads as the rhombus
//! it is. Red (`R`) connects top and bottom, Blue (`B`) left and right.

use hex_core::{GamePhase, GameSnapshot, Side};

fn cell_char(owner: Option<Side>) -> char {
    match owner {
        Some(Side::Red) => 'R',
        Some(Side::Blue) => 'B',
        None => '.',
    }
}

/// Render the board and a one-line status
pub fn render_snapshot(snapshot: &GameSnapshot) -> String {
    let n = snapshot.dimension;

    let mut result = String::from("    ");
    for c in 0..n {
        result.push((b'a' + c as u8) as char);
        result.push(' ');
    }
    result.push('\n');

    for r in 0..n {
        result += &format!("{}{:>3} ", " ".repeat(r), r + 1);
        for c in 0..n {
            result.push(cell_char(snapshot.owner(r, c)));
            result.push(' ');
        }
        result += &format!("{:<3}\n", r + 1);
    }

    result += &format!("{}    ", " ".repeat(n));
    for c in 0..n {
        result.push((b'a' + c as u8) as char);
        result.push(' ');
    }
    result.push('\n');

    result += &status_line(snapshot);
    result
}

/// One-line description of where the game stands
pub fn status_line(snapshot: &GameSnapshot) -> String {
    match (snapshot.phase, snapshot.winner, snapshot.to_move) {
        (GamePhase::NotStarted, _, _) => "Not started".to_string(),
        (GamePhase::Running, _, Some(side)) => {
            format!("Move {}: {} to play", snapshot.moves_played + 1, side)
        }
        (GamePhase::Running, _, None) => "Running".to_string(),
        (GamePhase::Ended, Some(side), _) => {
            format!("{} wins after {} moves", side, snapshot.moves_played)
        }
        (GamePhase::Ended, None, _) => {
            format!("Abandoned after {} moves", snapshot.moves_played)
        }
    }
}
