//! Liveness and readiness probes
//!
//! `/healthz` answers as long as the process serves HTTP. `/readyz` also
//! needs the SQLite pool to answer a query, so it turns false while the store
//! is closed or unreachable.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness of the service and of its store
#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub database: bool,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready only when the bookshelf tables can be queried
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let database = state.db.ping().await.is_ok();
    if !database {
        tracing::warn!("Readiness check failed: database did not answer");
    }

    Json(ReadyResponse {
        ready: database,
        database,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
