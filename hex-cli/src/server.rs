//! Server command - AI games behind the read-only observer API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: spawn_games(), wait_for_state(), run_games() (HTTP delegated to hex-server)
//! - Level 4: pacing and configuration validation

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use hex_cli::{build_player, PlayerKind};
use hex_core::{Board, GameError, HexGame, Move, Player, Side, DEFAULT_DIMENSION};
use hex_server::{run_server, ServerConfig, ServerState};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Board size (9-19)
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub size: usize,

    /// Red player
    #[arg(long, value_enum, default_value = "connection")]
    pub red: PlayerKind,

    /// Blue player
    #[arg(long, value_enum, default_value = "random")]
    pub blue: PlayerKind,

    /// Delay before each move so viewers can follow along
    #[arg(long, default_value = "250")]
    pub move_delay_ms: u64,

    /// Stop after this many games (default: play forever)
    #[arg(long)]
    pub games: Option<usize>,

    /// RNG seed for the automated players
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Directory of static files for a browser front end
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start the game thread and the server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting Hex observer server on port {}", config.port);

    start_server(&args, config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    if !args.red.is_automated() || !args.blue.is_automated() {
        bail!("serve only supports automated players");
    }
    hex_core::board::validate_dimension(args.size, args.size)?;

    if let Some(dir) = &args.static_dir {
        validate_static_dir(dir)?;
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args
            .static_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string()),
    })
}

/// Start the game thread and serve until interrupted
fn start_server(args: &ServerArgs, config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let size = args.size;
    let delay = Duration::from_millis(args.move_delay_ms);
    let limit = args.games;
    let red = Paced::new(build_player(args.red, Side::Red, args.seed), delay);
    let blue = Paced::new(build_player(args.blue, Side::Blue, args.seed.wrapping_add(1)), delay);

    runtime.block_on(async move {
        let (state_rx, games) = spawn_games(size, red, blue, limit);
        let (state, games) = wait_for_state(state_rx, games).await?;

        tokio::spawn(async move {
            match games.await {
                Ok(Ok(())) => tracing::info!("Games finished, still serving the final position"),
                Ok(Err(e)) => tracing::error!("Game loop failed: {:#}", e),
                Err(e) => tracing::error!("Game thread panicked: {}", e),
            }
        });

        run_server(config, state).await
    })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Run the game loop on a blocking thread. The receiver yields the shared
/// state once the game exists.
fn spawn_games<P: Player + Send + 'static>(
    size: usize,
    mut red: P,
    mut blue: P,
    limit: Option<usize>,
) -> (oneshot::Receiver<Arc<ServerState>>, JoinHandle<Result<()>>) {
    let (state_tx, state_rx) = oneshot::channel();

    let games = tokio::task::spawn_blocking(move || -> Result<()> {
        let names = (red.name().to_string(), blue.name().to_string());
        let mut game = HexGame::new(size, size, &mut red, &mut blue)?;
        let state = Arc::new(ServerState::new(game.observer(), names.0, names.1));
        let _ = state_tx.send(Arc::clone(&state));

        run_games(&mut game, &state, limit)
    });

    (state_rx, games)
}

/// Wait for the game thread's state, or report why it never arrived
async fn wait_for_state(
    state_rx: oneshot::Receiver<Arc<ServerState>>,
    games: JoinHandle<Result<()>>,
) -> Result<(Arc<ServerState>, JoinHandle<Result<()>>)> {
    match state_rx.await {
        Ok(state) => Ok((state, games)),
        Err(_) => Err(match games.await {
            Ok(Err(e)) => e.context("Game thread failed to start"),
            Ok(Ok(())) => anyhow!("Game thread exited before starting"),
            Err(e) => anyhow!("Game thread panicked: {}", e),
        }),
    }
}

/// Play games back to back on one board, resetting between them
fn run_games(game: &mut HexGame<'_>, state: &ServerState, limit: Option<usize>) -> Result<()> {
    let mut played = 0;

    loop {
        match game.start() {
            Ok(outcome) => {
                tracing::info!(
                    "Game {}: {} wins in {} moves",
                    played + 1,
                    outcome.winner,
                    outcome.moves.len()
                );
            }
            Err(err @ GameError::PlayerFailed { .. }) => {
                tracing::warn!("Game {} abandoned: {:#}", played + 1, anyhow::Error::from(err));
            }
            Err(err) => return Err(err.into()),
        }

        state.record_game_completed();
        played += 1;

        if limit.is_some_and(|max| played >= max) {
            return Ok(());
        }

        game.reset()?;
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Sleeps before every move so a watching renderer sees each position
struct Paced<P> {
    inner: P,
    delay: Duration,
}

impl<P: Player> Paced<P> {
    fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<P: Player> Player for Paced<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn side(&self) -> Side {
        self.inner.side()
    }

    fn request_move(&mut self, board: &Board) -> Result<Move> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.inner.request_move(board)
    }
}

/// Validate that static directory exists
fn validate_static_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        bail!("Static path exists but is not a directory: {}", path.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
