use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::ExposeSecret;
use trivia_api::db::{self, MemoryRepository, SqliteRepository};
use trivia_api::server::app::{run_server, AppState, Repo};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Storage backend
    #[clap(long, value_enum, default_value = "sqlite")]
    storage: Storage,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Storage {
    Sqlite,
    Memory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;

    let repo: Repo = match cli.storage {
        Storage::Sqlite => {
            let pool = db::establish_connection(
                settings.database.url.expose_secret(),
                settings.database.max_connections,
            )
            .await
            .context("Cannot connect to DB")?;
            tracing::info!("Running db migrations...");
            db::run_migrations(&pool).await?;
            Arc::new(SqliteRepository::new(pool))
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage, nothing will be persisted");
            Arc::new(MemoryRepository::new())
        }
    };

    run_server(AppState::new(repo), &settings.application.address()).await
}
