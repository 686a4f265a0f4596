//! HTTP surface for the handler.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use log::info;
use quip_core::{Envelope, Orchestrator, QuipRequest, QuipResponse};
use tower_http::cors::{Any, CorsLayer};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// GET /api/server?city=... - Run one weather quip
///
/// Query pairs are taken raw so a repeated `city` still yields an envelope.
async fn quip(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Envelope>) {
    let request = request_from_pairs(pairs);
    let response = state.orchestrator.handle(&request).await;
    into_http(response)
}

/// First `city` wins; other parameters are ignored.
fn request_from_pairs(pairs: Vec<(String, String)>) -> QuipRequest {
    let city = pairs.into_iter().find(|(k, _)| k == "city").map(|(_, v)| v);
    QuipRequest { city }
}

fn into_http(response: QuipResponse) -> (StatusCode, Json<Envelope>) {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

/// GET /health - Health check
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router
pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/server", get(quip))
        .route("/api/quip", get(quip))
        .layer(cors)
        .with_state(AppState { orchestrator })
}

/// Run the HTTP server
pub async fn run_http_server(addr: SocketAddr, orchestrator: Arc<Orchestrator>) -> anyhow::Result<()> {
    let app = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
