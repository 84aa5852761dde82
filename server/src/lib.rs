//! Homebase Backend
//!
//! Layered architecture:
//! - domain: Core entities and validation rules
//! - repository: SQLite data access
//! - routes: axum handlers for the quick-add UI

mod bootstrap;
pub mod config;
mod domain;
mod repository;
mod routes;

pub use config::Config;
pub use routes::{router, AppState};

use repository::{init_db, UserRepository};

/// Open the database, seed the admin, and serve until shutdown
pub async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(path = %config.database_path.display(), "opening database");
    let db = init_db(&config.database_path).await?;

    bootstrap::run(&UserRepository::new(db.conn.clone()), &config.admin).await;
    tokio::fs::create_dir_all(&config.media_dir).await?;

    let bind = config.bind;
    let base_path = config.base_path.clone();
    let app = router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, base = %base_path, "homebase server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
