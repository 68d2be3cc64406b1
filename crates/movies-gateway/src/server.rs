//! HTTP server for the movies gateway
//!
//! Provides /health, / and the /movies/{provider}/... routes.

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use cache_aside::CacheStats;
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::movies;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub providers: Vec<&'static str>,
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/movies/{provider}", get(movies::intro))
        .route("/movies/{provider}/", get(movies::intro))
        // Fixed paths before the search wildcard
        .route("/movies/{provider}/recent-shows", get(movies::recent_shows))
        .route("/movies/{provider}/recent-movies", get(movies::recent_movies))
        .route("/movies/{provider}/trending", get(movies::trending))
        .route("/movies/{provider}/info", get(movies::info))
        .route("/movies/{provider}/watch", get(movies::watch))
        .route("/movies/{provider}/servers", get(movies::servers))
        .route("/movies/{provider}/country/{country}", get(movies::by_country))
        .route("/movies/{provider}/genre/{genre}", get(movies::by_genre))
        .route("/movies/{provider}/{query}", get(movies::search))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: AppState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: state.cache.stats(),
    })
}

async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        providers: state.providers.names(),
    })
}
