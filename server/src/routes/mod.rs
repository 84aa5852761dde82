//! HTTP Routes
//!
//! Health, the chores record endpoints (quick-add resources and the chore
//! form) under the configured base path,
//! uploaded media, and the static UI bundle as fallback.

mod chores;
mod csrf;
mod error;
mod form;
mod health;
mod media;
mod records;
mod resources;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::{Equipment, Location, Task};
use crate::repository::DbState;

use media::MEDIA_URL;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DbState, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let records = Router::new()
        .merge(records::resource_routes::<Location>())
        .merge(records::resource_routes::<Equipment>())
        .merge(records::resource_routes::<Task>())
        .merge(chores::chore_routes());
    let records = if config.base_path.is_empty() {
        records
    } else {
        Router::new().nest(&config.base_path, records)
    };

    let index = config.static_dir.join("index.html");
    Router::new()
        .route("/health", get(health::health))
        .merge(records)
        .nest_service(MEDIA_URL, ServeDir::new(&config.media_dir))
        .fallback_service(ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)))
        .layer(middleware::from_fn(csrf::csrf_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
