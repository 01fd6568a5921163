//! Hex CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single game (humans and/or AIs)
//! - match: Pit two automated players against each other
//! - serve: Run automated games behind the read-only observer API

mod match_cmd;
mod play;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hex")]
#[command(about = "Play the connection game Hex")]
struct Cli {
    /// Default log filter when RUST_LOG is unset ("error", "warn", "info", "debug", "trace")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play::PlayArgs),
    /// Play many games between automated players
    Match(match_cmd::MatchArgs),
    /// Serve live game state over HTTP while AIs play
    Serve(server::ServerArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli.log_level);

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Serve(args) => server::run(args),
    }
}

fn initialize_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
