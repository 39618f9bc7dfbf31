//! songbook-api library - catalog REST service
//!
//! Song CRUD endpoints, catalog statistics, health and build info.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Layers: request tracing and permissive CORS for the browser client.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route("/api/songs", get(api::list_songs).post(api::create_song))
        .route(
            "/api/songs/:id",
            get(api::get_song)
                .put(api::update_song)
                .delete(api::delete_song),
        )
        .route("/api/stats", get(api::get_stats));

    Router::new()
        .merge(catalog)
        .merge(api::meta::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
