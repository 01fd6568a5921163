//! Play command - a single game on the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_game()
//! - Level 3: (delegated to hex-core's HexGame)
//! - Level 4: seeding utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hex_cli::{build_player, render_snapshot, GameConfig, PlayerKind};
use hex_core::{GameError, HexGame, Side, TurnOutcome};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board size (9-19)
    #[arg(long)]
    pub size: Option<usize>,

    /// Who plays Red (moves first, connects top and bottom)
    #[arg(long, value_enum)]
    pub red: Option<PlayerKind>,

    /// Who plays Blue (connects left and right)
    #[arg(long, value_enum)]
    pub blue: Option<PlayerKind>,

    /// RNG seed for automated players
    #[arg(long)]
    pub seed: Option<u64>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load and validate configuration
/// 2. Play one game, printing the board after every move
pub fn run(args: PlayArgs) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        "Starting {}x{} game: {:?} (Red) vs {:?} (Blue)",
        config.dimension,
        config.dimension,
        config.red,
        config.blue
    );

    play_game(&config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file (or defaults) with command-line overrides applied
fn load_config(args: &PlayArgs) -> Result<GameConfig> {
    let base = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let config = base.with_overrides(args.size, args.red, args.blue, args.seed);
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn play_game(config: &GameConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "Seeding automated players");

    let mut red = build_player(config.red, Side::Red, seed);
    let mut blue = build_player(config.blue, Side::Blue, seed.wrapping_add(1));
    let mut game = HexGame::new(config.dimension, config.dimension, &mut *red, &mut *blue)?;
    let observer = game.observer();

    game.begin()?;
    println!("{}", render_snapshot(&observer.snapshot()));

    loop {
        match game.step() {
            Ok(TurnOutcome::Continue) => {
                println!("{}", render_snapshot(&observer.snapshot()));
            }
            Ok(TurnOutcome::Won(_)) => {
                println!("{}", render_snapshot(&observer.snapshot()));
                return Ok(());
            }
            Err(err @ GameError::PlayerFailed { .. }) => {
                println!("{}", render_snapshot(&observer.snapshot()));
                return Err(err).context("Game abandoned");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
