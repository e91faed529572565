//! Cosmic Race - Unified CLI
//!
//! Serves the race over HTTP or plays one out in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use cosmic_race::{
    AppState, BoardView, RandomDie, ServerConfig, SessionManager, SqliteStore, StorageKind,
    advance_turn, initialize, router,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            host,
            storage,
            db_path,
            seed,
        } => {
            let config = resolve_config(config, port, host, storage, db_path, seed)?;
            run_http_server(config).await
        }
        Command::Simulate { players, seed } => run_simulation(&players, seed),
    }
}

/// Merges the config file with command-line overrides.
#[instrument]
fn resolve_config(
    path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
    storage: Option<StorageKind>,
    db_path: Option<String>,
    seed: Option<u64>,
) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(path.as_deref())?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(storage) = storage {
        config = config.with_storage(storage);
    }
    if let Some(db_path) = db_path {
        config = config.with_database_path(db_path);
    }
    if seed.is_some() {
        config = config.with_die_seed(seed);
    }
    debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Run the HTTP game server
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting Cosmic Race HTTP server");

    let sessions = match config.storage() {
        StorageKind::Sqlite => SessionManager::new(SqliteStore::open(config.database_path().clone())?),
        StorageKind::Memory => SessionManager::in_memory(),
    };
    let die = RandomDie::from_seed(*config.die_seed());
    let app = router(AppState::new(sessions, die));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        address = %config.bind_address(),
        storage = %config.storage(),
        "Server ready"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Play a race to the finish in the terminal
#[instrument]
fn run_simulation(players: &[String], seed: Option<u64>) -> Result<()> {
    let mut die = RandomDie::from_seed(seed);
    let mut game = initialize(players)?;
    let mut turns = 0usize;

    println!("{}\n", BoardView::from(&game).render_text());
    while !game.is_over() {
        game = advance_turn(&game, &mut die)?;
        turns += 1;
        if let Some(turn) = game.last_turn() {
            let name = game.players()[turn.player_index].name();
            println!("{name} rolled {} and moved {} -> {}", turn.roll, turn.from, turn.to);
        }
    }

    let view = BoardView::from(&game);
    println!("\n{}\n", view.render_text());
    if let Some(winner) = &view.winner {
        println!("{} wins after {} turns!", winner.name, turns);
    }
    info!(turns, "Simulation finished");
    Ok(())
}
