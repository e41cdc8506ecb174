pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod validation;
pub mod error;
pub mod controllers;

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub bookings: services::BookingService,
    pub config: config::Config,
}

impl AppState {
    /// Opens the database, applies migrations and seeds the default event.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database)
            .await
            .with_context(|| format!("failed to open {}", config.database.url))?;
        tracing::info!("Database connected");

        db.run_migrations().await.context("failed to run migrations")?;
        db.seed_default_event().await.context("failed to seed default event")?;

        let bookings = services::BookingService::new(db.clone());
        Ok(Arc::new(Self { db, bookings, config }))
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .fallback(controllers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
