//! Session lifecycle and event delivery.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
};
use explorer_common::{ExplorerError, InputEvent};
use reactive::{DashboardSession, PanelUpdate, SessionSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;

use super::{error_response, json_response};

#[derive(Debug, Deserialize)]
pub struct CreateSessionQuery {
    pub path: Option<String>,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub updates: Vec<PanelUpdate>,
}

#[derive(Serialize)]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_at: Option<chrono::DateTime<chrono::Utc>>,
    pub events_applied: u64,
    #[serde(flatten)]
    pub state: SessionSnapshot<'a>,
}

#[derive(Serialize)]
pub struct EventApplied {
    pub updates: Vec<PanelUpdate>,
}

fn parse_id(raw: &str) -> Result<Uuid, ExplorerError> {
    Uuid::parse_str(raw).map_err(|_| ExplorerError::SessionNotFound(raw.to_string()))
}

/// POST /api/sessions?path= - Open a session and render its first page
pub async fn create_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<CreateSessionQuery>,
) -> Response {
    let path = query.path.unwrap_or_else(|| "/".to_string());
    let (session, updates) =
        DashboardSession::open(state.registry.clone(), state.context.clone(), &path);
    let session_id = state.sessions.insert(session).await;

    tracing::info!(session = %session_id, path = %path, "Session opened");
    json_response(
        StatusCode::CREATED,
        &SessionCreated {
            session_id,
            updates,
        },
    )
}

/// GET /api/sessions/:id - Current inputs, page and panel states
pub async fn get_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let Some(shared) = state.sessions.get(&id).await else {
        return error_response(&ExplorerError::SessionNotFound(raw_id));
    };

    let entry = shared.lock().await;
    json_response(
        StatusCode::OK,
        &SessionView {
            session_id: id,
            created_at: entry.created_at,
            last_event_at: entry.last_event_at,
            events_applied: entry.events_applied,
            state: entry.session.snapshot(),
        },
    )
}

/// POST /api/sessions/:id/events - Apply one input event
pub async fn event_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let event: InputEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => return error_response(&ExplorerError::from(e)),
    };
    let Some(shared) = state.sessions.get(&id).await else {
        return error_response(&ExplorerError::SessionNotFound(raw_id));
    };

    // Held for the whole event so events of one session never interleave
    let mut entry = shared.lock().await;
    match entry.session.apply(event) {
        Ok(updates) => {
            entry.touch();
            json_response(StatusCode::OK, &EventApplied { updates })
        }
        Err(e) => {
            tracing::info!(session = %id, error = %e, "Rejected input event");
            error_response(&e)
        }
    }
}

/// DELETE /api/sessions/:id - Close a session
pub async fn delete_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    if state.sessions.remove(&id).await {
        tracing::info!(session = %id, "Session closed");
        Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(axum::body::Body::empty())
            .unwrap_or_default()
    } else {
        error_response(&ExplorerError::SessionNotFound(raw_id))
    }
}
