//! Match command - play games between two automated players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{bail, Result};
use clap::Args;
use rayon::prelude::*;

use hex_cli::{build_player, PlayerKind};
use hex_core::{HexGame, Side, DEFAULT_DIMENSION};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// First automated player
    #[arg(long, value_enum, default_value = "connection")]
    pub first: PlayerKind,

    /// Second automated player
    #[arg(long, value_enum, default_value = "random")]
    pub second: PlayerKind,

    /// Number of games to play (will alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board size (9-19)
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub size: usize,

    /// Base RNG seed; game i uses seed + i
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// True if the first player had Red in this game
    first_was_red: bool,
    winner: Side,
    moves: usize,
}

impl GameRecord {
    fn first_won(&self) -> bool {
        (self.winner == Side::Red) == self.first_was_red
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    red_wins: usize,
    blue_wins: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Check the players are automated
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    if !args.first.is_automated() || !args.second.is_automated() {
        bail!("match only supports automated players");
    }

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, {}x{})",
        args.first,
        args.second,
        args.games,
        args.size,
        args.size
    );

    let results = play_match(&args)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs) -> Result<MatchResults> {
    let numbers: Vec<usize> = (1..=args.games).collect();

    let games = if args.sequential {
        numbers
            .iter()
            .map(|&n| play_single_game(args, n))
            .collect::<Result<Vec<_>>>()?
    } else {
        numbers
            .par_iter()
            .map(|&n| play_single_game(args, n))
            .collect::<Result<Vec<_>>>()?
    };

    for record in &games {
        tracing::info!(
            "Game {}: {} wins in {} moves",
            record.game_number,
            record.winner,
            record.moves
        );
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game; the first player takes Red in odd-numbered games
fn play_single_game(args: &MatchArgs, game_number: usize) -> Result<GameRecord> {
    let first_was_red = game_number % 2 == 1;
    let (red_kind, blue_kind) = if first_was_red {
        (args.first, args.second)
    } else {
        (args.second, args.first)
    };

    let seed = args.seed.wrapping_add(game_number as u64 * 2);
    let mut red = build_player(red_kind, Side::Red, seed);
    let mut blue = build_player(blue_kind, Side::Blue, seed.wrapping_add(1));

    let mut game = HexGame::new(args.size, args.size, &mut *red, &mut *blue)?;
    let outcome = game.start()?;

    Ok(GameRecord {
        game_number,
        first_was_red,
        winner: outcome.winner,
        moves: outcome.moves.len(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.first_won()).count();
    let red_wins = games.iter().filter(|g| g.winner == Side::Red).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        first_wins,
        second_wins: games.len() - first_wins,
        red_wins,
        blue_wins: games.len() - red_wins,
        avg_moves,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percentage(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        red: PlayerKind,
        blue: PlayerKind,
        winner: Side,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        first: PlayerKind,
        second: PlayerKind,
        first_wins: usize,
        second_wins: usize,
        red_wins: usize,
        blue_wins: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        first: args.first,
        second: args.second,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| {
                let (red, blue) = if g.first_was_red {
                    (args.first, args.second)
                } else {
                    (args.second, args.first)
                };
                JsonGame {
                    game_number: g.game_number,
                    red,
                    blue,
                    winner: g.winner,
                    moves: g.moves,
                }
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "{:?} wins:  {} ({:.1}%)",
        args.first,
        results.first_wins,
        percentage(results.first_wins, total)
    );
    println!(
        "{:?} wins:  {} ({:.1}%)",
        args.second,
        results.second_wins,
        percentage(results.second_wins, total)
    );
    println!(
        "Red wins:    {} ({:.1}%)",
        results.red_wins,
        percentage(results.red_wins, total)
    );
    println!(
        "Blue wins:   {} ({:.1}%)",
        results.blue_wins,
        percentage(results.blue_wins, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_number: usize, first_was_red: bool, winner: Side, moves: usize) -> GameRecord {
        GameRecord {
            game_number,
            first_was_red,
            winner,
            moves,
        }
    }

    fn args(games: usize) -> MatchArgs {
        MatchArgs {
            first: PlayerKind::Connection,
            second: PlayerKind::Random,
            games,
            size: 9,
            seed: 5,
            sequential: false,
            json: false,
        }
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.first_wins, 0);
        assert_eq!(results.second_wins, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            record(1, true, Side::Red, 30),
            record(2, false, Side::Red, 40),
            record(3, true, Side::Blue, 50),
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.first_wins, 1);
        assert_eq!(results.second_wins, 2);
        assert_eq!(results.red_wins, 2);
        assert_eq!(results.blue_wins, 1);
        assert_eq!(results.avg_moves, 40.0);
    }

    #[test]
    fn test_colors_alternate() {
        let a = play_single_game(&args(2), 1).unwrap();
        let b = play_single_game(&args(2), 2).unwrap();
        assert!(a.first_was_red);
        assert!(!b.first_was_red);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = play_match(&args(4)).unwrap();
        let sequential = play_match(&MatchArgs {
            sequential: true,
            ..args(4)
        })
        .unwrap();

        let winners = |r: &MatchResults| r.games.iter().map(|g| (g.game_number, g.winner)).collect::<Vec<_>>();
        assert_eq!(winners(&parallel), winners(&sequential));
    }

    #[test]
    fn test_human_rejected() {
        let bad = MatchArgs {
            second: PlayerKind::Human,
            ..args(1)
        };
        assert!(run(bad).is_err());
    }
}
