//! End-to-end tests of the HTTP surface against a dataset written to disk.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use explorer_api::config::DashboardConfig;
use explorer_api::state::AppState;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use test_utils::{ames, ames_location, routes, temp_test_dir, DatasetBuilder, LocationSpec};

struct TestApp {
    router: Router,
    // Keeps the dataset files alive for the duration of the test
    _dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = temp_test_dir();
    let data = DatasetBuilder::new()
        .location(ames_location())
        .location(LocationSpec::new("X2").city("BOONE").state("IA"))
        .write_files(dir.path())
        .unwrap();

    let config = DashboardConfig {
        data,
        ..DashboardConfig::default()
    };
    let state = Arc::new(AppState::new(config).unwrap());
    let handle = PrometheusBuilder::new().build_recorder().handle();

    TestApp {
        router: explorer_api::app(state, handle),
        _dir: dir,
    }
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_session(app: &TestApp, path: &str) -> (String, Value) {
    let uri = format!("/api/sessions?path={}", path);
    let (status, body) = send(app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["session_id"].as_str().unwrap().to_string();
    (id, body)
}

fn update<'a>(body: &'a Value, output: &str) -> &'a Value {
    body["updates"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["output"] == output)
        .unwrap_or_else(|| panic!("no update for {}", output))
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["locations"], 2);
    assert_eq!(body["sessions"]["live"], 0);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_page_resolution() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/pages?path=/taxa", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variant"], "taxa");
    assert_eq!(body["panels"], json!(["map", "taxa-table"]));

    // Unknown paths fall back to the index page
    let uri = format!("/api/pages?path={}", routes::UNKNOWN);
    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["variant"], "index");

    let (_, body) = send(&app, Method::GET, "/api/pages", None).await;
    assert_eq!(body["variant"], "index");
}

#[tokio::test]
async fn test_routes_and_map_settings() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/routes", None).await;
    assert_eq!(status, StatusCode::OK);
    let paths: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["path"].as_str())
        .collect();
    assert!(paths.contains(&routes::ABOUT));
    assert!(paths.contains(&routes::MODEL));

    let (status, body) = send(&app, Method::GET, "/api/map-settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zoom"], 3.0);
    assert!(body["style"].as_str().unwrap().starts_with("mapbox://"));
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    let app = test_app();
    let (id, body) = open_session(&app, routes::INDEX).await;

    // First render: page layout plus every index panel
    let page = update(&body, "page-content");
    assert_eq!(page["displayed"]["kind"], "page");
    let map = update(&body, "map");
    let sizes = &map["displayed"]["value"]["data"][0]["marker"]["size"];
    assert_eq!(sizes[0], 16.0);

    // Nothing hovered yet, the description panel reports why
    let text = update(&body, "text-content");
    assert_eq!(text["displayed"], Value::Null);
    assert_eq!(text["failure"]["kind"], "missing_selection");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/sessions/{}/events", id),
        Some(json!({"type": "location_hovered", "id": ames::ID})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let text = update(&body, "text-content");
    assert!(text["displayed"]["value"]["text"]
        .as_str()
        .unwrap()
        .starts_with("In Ames, IA"));
    let dist = update(&body, "communities-dist");
    assert_eq!(dist["displayed"]["value"]["data"][0]["y"][0], 0.4);
    // The map does not depend on the hover
    assert!(body["updates"]
        .as_array()
        .unwrap()
        .iter()
        .all(|u| u["output"] != "map"));

    let (status, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events_applied"], 1);
    assert_eq!(body["inputs"]["selection"]["hovered_location"], ames::ID);
    assert_eq!(body["page"]["variant"], "index");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn test_navigation_swaps_panels() {
    let app = test_app();
    let (id, _) = open_session(&app, routes::INDEX).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/sessions/{}/events", id),
        Some(json!({"type": "navigation_changed", "path": routes::TAXA})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table = update(&body, "taxa-table");
    assert_eq!(table["displayed"]["kind"], "table");

    let (_, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    let panels = body["panels"].as_object().unwrap();
    assert!(panels.contains_key("taxa-table"));
    assert!(!panels.contains_key("location-values"));
}

#[tokio::test]
async fn test_invalid_events_are_rejected() {
    let app = test_app();
    let (id, _) = open_session(&app, routes::INDEX).await;
    let uri = format!("/api/sessions/{}/events", id);

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({"type": "shake"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_event");

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(json!({"type": "community_selected", "index": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "out_of_range");

    // Rejected events leave the session untouched
    let (_, body) = send(&app, Method::GET, &format!("/api/sessions/{}", id), None).await;
    assert_eq!(body["events_applied"], 0);
    assert_eq!(body["inputs"]["selection"]["selected_community"], 0);
}

#[tokio::test]
async fn test_unknown_sessions() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sessions/not-a-uuid/events",
        Some(json!({"type": "community_selected", "index": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/sessions/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
