//! Mesa HTTP Server Binary
//!
//! Main entry point for the booking REST API server. It initializes the
//! repository and lock store, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) repository (default)
//! cargo run --bin mesa-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CONFIG_PATH`: Optional TOML configuration file
//! - `REPOSITORY_TYPE`: Storage backend (default: local)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use mesa_rust::config::AppConfig;
use mesa_rust::db::factory::RepositoryFactory;
use mesa_rust::http::{create_router, AppState};
use mesa_rust::locks::InMemoryLockStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting Mesa HTTP Server");

    let config = AppConfig::load()?;
    let repo_type = config
        .repository_type()
        .map_err(|e| anyhow::anyhow!(e))?;
    let repository = RepositoryFactory::create(repo_type).map_err(anyhow::Error::from)?;
    info!(?repo_type, "Repository initialized");

    let locks = Arc::new(InMemoryLockStore::new());
    let state = AppState::new(repository, locks, config.engine_settings());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
