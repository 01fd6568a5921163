//! Example to run the observer server next to a single AI game
//!
//! Run with: cargo run -p hex-server --example run_server

use std::sync::Arc;
use std::time::Duration;

use hex_core::{ConnectionPlayer, HexGame, Player, RandomPlayer, Side};
use hex_server::{run_server, ServerConfig, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();
    let (observer_tx, observer_rx) = tokio::sync::oneshot::channel();

    // The game loop blocks, so it gets its own thread
    let game = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut red = ConnectionPlayer::new(Side::Red);
        let mut blue = RandomPlayer::new(Side::Blue);
        let names = (red.name().to_string(), blue.name().to_string());
        let mut game = HexGame::with_default_board(&mut red, &mut blue)?;
        let _ = observer_tx.send((game.observer(), names));

        game.begin()?;
        while game.step()? == hex_core::TurnOutcome::Continue {
            std::thread::sleep(Duration::from_millis(250));
        }
        Ok(())
    });

    let (observer, (red, blue)) = observer_rx.await?;
    let state = Arc::new(ServerState::new(observer, red, blue));

    println!("Serving game state on http://localhost:{}/api/board", config.port);

    tokio::spawn(async move {
        match game.await {
            Ok(Ok(())) => tracing::info!("Game finished, still serving the final position"),
            Ok(Err(e)) => tracing::error!("Game failed: {:#}", e),
            Err(e) => tracing::error!("Game thread panicked: {}", e),
        }
    });

    run_server(config, state).await
}
