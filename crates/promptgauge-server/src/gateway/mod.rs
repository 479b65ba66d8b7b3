//! HTTP gateway (axum) for the scoring pipeline.
//!
//! This module is primarily used by the `promptgauge` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::score_handler;
pub use state::HandlerState;

use promptgauge::{ChatTransport, ScoreCache};

pub fn create_router_with_state<T, C>(state: HandlerState<T, C>) -> Router
where
    T: ChatTransport + 'static,
    C: ScoreCache + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/v1/score", post(score_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub model: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<T, C>(State(state): State<HandlerState<T, C>>) -> Json<ReadyResponse>
where
    T: ChatTransport + 'static,
    C: ScoreCache + 'static,
{
    Json(ReadyResponse {
        status: "ok",
        model: state.pipeline.model().to_string(),
    })
}
