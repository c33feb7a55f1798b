//! Strictly Snake-Water-Gun - unified CLI

use anyhow::Result;
use clap::Parser;
use strictly_swg::Session;
use strictly_swg_server::cli::{Cli, Command, GameArgs};
use strictly_swg_server::{SessionManager, play, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, game } => run_server(host, port, game).await,
        Command::Play { game } => run_play(game),
    }
}

/// Run the HTTP game server
async fn run_server(host: Option<String>, port: Option<u16>, game: GameArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = game.load()?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    info!(
        host = %config.host(),
        port = config.port(),
        max_rounds = config.game().max_rounds().get(),
        "Starting Snake-Water-Gun server"
    );

    let sessions = SessionManager::with_random_moves(config.game().clone());
    let app = router(sessions);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
#[instrument]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Play one game in the terminal
fn run_play(game: GameArgs) -> Result<()> {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = game.load()?;
    let game = config.game();
    let mut session = Session::new(*game.max_rounds(), game.opponent(0));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play::run(&mut session, game.messages(), stdin.lock(), stdout.lock())
}
