use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_catalog::db::{establish_connection, run_migrations};
use trivia_catalog::settings::DatabaseSettings;
use trivia_catalog::telemetry::init_tracing;
use trivia_catalog::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about = "Import or export trivia data as CSV", long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Write categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let cli = Cli::parse();
    let settings = DatabaseSettings {
        path: cli.db_path.display().to_string(),
        max_connections: 1,
    };
    let pool = establish_connection(&settings)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    match cli.command {
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export"),
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import"),
    }
}
