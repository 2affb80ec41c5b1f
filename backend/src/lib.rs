//! # Hall booking backend
//!
//! Serves the booking REST API and, optionally, the built frontend.
//!
//! ```text
//! REST layer (rest.rs, axum handlers)
//!     ↓
//! Domain layer (domain.rs, BookingService)
//!     ↓
//! Storage layer (db.rs, SQLite via sqlx)
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod rest;

use anyhow::Result;
use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::db::DbConnection;
use crate::domain::BookingService;
pub use crate::rest::AppState;

/// Open the database named by `config` and build the application state
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    Ok(AppState::new(BookingService::new(db)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut app = Router::new().nest("/api/bookings", rest::router());

    if let Some(static_dir) = &config.static_dir {
        info!("Serving frontend from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
