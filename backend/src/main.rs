//! museboard-server
//!
//! Serves the HTTP CRUD surface over the SQLite document store, or
//! seeds it with sample data.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use museboard_backend::api::{self, ApiState};
use museboard_backend::config::ServerConfig;
use museboard_backend::{open_stores, seed};

#[derive(Debug, Parser)]
#[command(name = "museboard-server")]
#[command(about = "Document store and CRUD endpoints for museboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP endpoints
    Serve {
        /// Listen address, e.g. 127.0.0.1:3000
        #[arg(long)]
        addr: Option<String>,
        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Write the sample dataset into the database
    Seed {
        /// SQLite database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr, db } => {
            let config = ServerConfig::from_env().with_overrides(addr, db);
            let stores = open_stores(&config.db_path);
            let state = ApiState {
                collections: stores.collections,
                profiles: stores.profiles,
            };

            let listener = tokio::net::TcpListener::bind(&config.addr)
                .await
                .with_context(|| format!("Failed to bind {}", config.addr))?;
            log::info!("Listening on http://{}", config.addr);

            axum::serve(listener, api::router(state))
                .await
                .context("Server error")?;
        }
        Command::Seed { db } => {
            let config = ServerConfig::from_env().with_overrides(None, db);
            let stores = open_stores(&config.db_path);
            let count = seed::seed_database(stores.collections.as_ref())
                .await
                .context("Seeding failed")?;
            log::info!("Seeded {} collections into {}", count, config.db_path.display());
        }
    }

    Ok(())
}
