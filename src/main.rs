//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables, opens
//! the database and blob store, and runs the API server.

use clap::Parser;
use opsboard::api::server;
use opsboard::cli::Cli;
use opsboard::db::Database;
use opsboard::storage::BlobStore;
use opsboard::utils;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::try_parse().expect("Failed to parse CLI arguments");
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let db_path = cli
        .database_path
        .or_else(|| std::env::var("DATABASE_PATH").ok())
        .unwrap_or_else(|| "opsboard.db".to_string());
    let blob_dir = cli
        .blob_dir
        .or_else(|| std::env::var("BLOB_DIR").ok())
        .unwrap_or_else(|| "blobs".to_string());

    let database = Database::new(&db_path);
    let blobs = BlobStore::new(&blob_dir).expect("Failed to open blob store");

    info!("Starting API server on port {}", cli.port);
    if let Err(e) = server::launch_server(cli.port, database, blobs).await {
        error!("Failed to start server: {}", e);
        std::process::exit(1);
    }
}
