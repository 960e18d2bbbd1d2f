//! HTTP gateway (Axum) for the search pipeline.
//!
//! One business route (`POST /search`) plus the usual health probes. Errors
//! cross this boundary as JSON `{ error, code }` bodies with a status per
//! error kind; see [`error::GatewayError`].

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::search_handler;
pub use payload::{RankedListing, SearchRequest, SearchResponse};
pub use state::HandlerState;

use crate::store::DocumentStore;

pub fn create_router_with_state<D>(state: HandlerState<D>) -> Router
where
    D: DocumentStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<D>))
        .route("/search", post(search_handler))
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
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub embedder: &'static str,
    pub embedding_dim: usize,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn ready_handler<D>(
    axum::extract::State(state): axum::extract::State<HandlerState<D>>,
) -> Json<ReadyResponse>
where
    D: DocumentStore + 'static,
{
    let embedder = if state.embedder.is_stub() {
        "stub"
    } else {
        "ready"
    };

    Json(ReadyResponse {
        status: "ready",
        components: ComponentStatus {
            embedder,
            embedding_dim: state.embedder.embedding_dim(),
        },
    })
}
