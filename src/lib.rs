//! Searchable product listing served as server-side HTML from a read-only
//! SQLite snapshot.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use axum::{routing::get, Router};
use config::Config;
use models::storage::ProductStore;
use routes::{health::health_check, search::search_products};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Process-wide handle to the dataset, shared by every request.
pub type Backend = Arc<dyn ProductStore + Send + Sync>;

pub fn app(backend: Backend, config: &Config) -> Router {
    Router::new()
        .route("/", get(search_products))
        .route("/status", get(health_check))
        .nest_service("/public", ServeDir::new(&config.public_dir))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}
