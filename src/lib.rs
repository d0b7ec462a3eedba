//! Tourflow booking API.
//!
//! JSON HTTP service for the travel-tour booking platform: trip
//! composition, interactive price quotes and booking lifecycle. The
//! admin back-office and client UI live elsewhere and call into these
//! endpoints.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cache::{AppCache, CacheStats};
use config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Config,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache/invalidate", post(cache_invalidate))
        .route("/api/trips", get(routes::trips::list))
        .route("/api/trips/:id", get(routes::trips::detail))
        .route("/api/bookings", post(routes::bookings::create))
        .route("/api/bookings/:id", get(routes::bookings::detail))
        .route("/api/bookings/:id/status", patch(routes::bookings::update_status))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Drop all cached catalog reads so admin edits take effect before the
/// TTLs expire
async fn cache_invalidate(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    StatusCode::NO_CONTENT
}
