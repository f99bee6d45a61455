//! Page resolution and map settings.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

use super::json_response;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

/// GET /api/pages?path= - Resolve a navigation path to its page layout
pub async fn page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let layout = state.context.router.resolve(&query.path).layout();
    json_response(StatusCode::OK, &layout)
}

#[derive(Serialize)]
pub struct RouteEntry<'a> {
    pub path: &'a str,
    pub page: explorer_common::PageVariant,
}

/// GET /api/routes - Every configured route
pub async fn routes_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let routes: Vec<RouteEntry> = state
        .context
        .router
        .routes()
        .map(|(path, page)| RouteEntry { path, page })
        .collect();
    json_response(StatusCode::OK, &routes)
}

/// GET /api/map-settings - Tile service settings for the map panel
pub async fn map_settings_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    json_response(StatusCode::OK, &state.context.config.map.mapbox_layout())
}
