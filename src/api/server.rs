use crate::api::routes;
use crate::db::Database;
use crate::storage::BlobStore;
use std::net::SocketAddr;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `port` - Port number to listen on for incoming HTTP connections
/// * `database` - Database connection pool shared across handlers
/// * `blobs` - Attachment blob store shared across handlers
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok when the server
///   shuts down, Error if it fails to start
pub async fn launch_server(
    port: u16,
    database: Database,
    blobs: BlobStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::app(database, blobs);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
