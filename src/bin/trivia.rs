use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_catalog::db::{establish_connection, run_migrations};
use trivia_catalog::server::run_server;
use trivia_catalog::settings::Settings;
use trivia_catalog::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about = "Serve the trivia catalog over HTTP", long_about = None)]
struct Cli {
    /// Settings file, defaults to an optional catalog.toml in the working directory
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Skip applying migrations on startup
    #[clap(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing("info,tower_http=debug");
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    let pool = establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path))?;

    if !cli.no_migrate {
        tracing::info!("Running db migrations...");
        run_migrations(&pool).await.context("Failed to run migrations")?;
    }

    run_server(pool, &settings.server).await
}
