//! Command-line interface for cosmic_race.

use clap::{Parser, Subcommand};
use cosmic_race::StorageKind;

/// Cosmic Race - dice race board game server
#[derive(Parser, Debug)]
#[command(name = "cosmic_race")]
#[command(about = "Dice race board game for 2 to 4 players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Storage backend: sqlite or memory (overrides config)
        #[arg(long)]
        storage: Option<StorageKind>,

        /// SQLite database file (overrides config)
        #[arg(long)]
        db_path: Option<String>,

        /// Seed the die for reproducible games (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a whole race locally and print every turn
    Simulate {
        /// Player names in seat order (2 to 4)
        #[arg(required = true, num_args = 1..)]
        players: Vec<String>,

        /// Seed the die for a reproducible race
        #[arg(long)]
        seed: Option<u64>,
    },
}
