//! Explorer API Service Library
//!
//! HTTP transport between the dashboard shell and the reactive layer. The
//! shell opens a session, posts input events and draws the figures and
//! tables that come back.

pub mod config;
pub mod handlers;
pub mod sessions;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the service router.
pub fn app(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    Router::new()
        // Pages
        .route("/api/pages", get(handlers::pages::page_handler))
        .route("/api/routes", get(handlers::pages::routes_handler))
        .route(
            "/api/map-settings",
            get(handlers::pages::map_settings_handler),
        )
        // Sessions
        .route(
            "/api/sessions",
            post(handlers::sessions::create_session_handler),
        )
        .route(
            "/api/sessions/:id",
            get(handlers::sessions::get_session_handler)
                .delete(handlers::sessions::delete_session_handler),
        )
        .route(
            "/api/sessions/:id/events",
            post(handlers::sessions::event_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
