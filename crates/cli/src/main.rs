//! Stockwatch CLI - Database migrations and fixture tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! sw-cli migrate run
//!
//! # Show applied and pending migrations
//! sw-cli migrate info
//!
//! # Seed the database from a fixture file
//! sw-cli seed --file crates/cli/fixtures/demo.yaml --reset
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run or inspect database migrations
//! - `seed` - Load a YAML fixture into the database

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(author, version, about = "Stockwatch CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Seed the database with fixture data
    Seed {
        /// Path to the YAML fixture file
        #[arg(short, long, default_value = "crates/cli/fixtures/demo.yaml")]
        file: String,

        /// Truncate all tables before seeding
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply pending migrations
    Run,
    /// Show applied and pending migrations
    Info,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await?,
            MigrateAction::Info => commands::migrate::info().await?,
        },
        Commands::Seed { file, reset } => {
            commands::seed::from_file(&file, reset).await?;
        }
    }
    Ok(())
}
