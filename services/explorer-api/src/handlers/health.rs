//! Health and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::sessions::SessionStatsSnapshot;
use crate::state::AppState;

use super::json_response;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub locations: usize,
    pub outputs: usize,
    pub sessions: SessionStatsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo_hit_rate: Option<f64>,
    pub uptime_seconds: i64,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Dataset and session summary
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let locations = state.context.store.len();
    let response = ReadyResponse {
        ready: locations > 0,
        locations,
        outputs: state.registry.outputs().count(),
        sessions: state.sessions.stats().await,
        memo_hit_rate: state.registry.memo().map(|m| m.stats().hit_rate()),
        uptime_seconds: (chrono::Utc::now() - state.started_at).num_seconds(),
    };

    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_response(status, &response)
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(handle.render().into())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "ok");
    }
}
