use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::core::{
    TodoSplit, create_event, get_event, list_todo, list_week, mark_event_completed,
    split_todo_by_current_week,
};
use crate::db::pool::Session;
use crate::errors::{AppError, AppResult};
use crate::models::{EventCreate, EventRead};

/// Run blocking storage work on the blocking pool with a fresh session.
/// The session is dropped (and its connection closed) when `work` returns.
async fn with_session<T, F>(state: &AppState, work: F) -> AppResult<T>
where
    F: FnOnce(&mut Session) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || {
        let mut session = db.session()?;
        work(&mut session)
    })
    .await
    .map_err(|e| AppError::Other(format!("storage task failed: {}", e)))?
}

pub async fn read_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "Poppy": "Your Popeye-powered secretary" }))
}

pub async fn create_event_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<EventCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<EventRead>)> {
    let Json(payload) = payload.map_err(|rej| AppError::Validation(rej.body_text()))?;

    let ev = with_session(&state, move |session| create_event(session, &payload)).await?;
    info!(id = ev.id, "POST /event");
    Ok((StatusCode::CREATED, Json(ev)))
}

#[derive(Debug, Deserialize)]
pub struct WeekParams {
    pub anchor: Option<NaiveDate>,
}

pub async fn get_events_in_week(
    State(state): State<AppState>,
    params: Result<Query<WeekParams>, QueryRejection>,
) -> AppResult<Json<Vec<EventRead>>> {
    let Query(params) = params.map_err(|rej| AppError::Validation(rej.body_text()))?;

    let events = with_session(&state, move |session| list_week(session, params.anchor)).await?;
    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct TodoParams {
    #[serde(default)]
    pub all: bool,
}

pub async fn get_todo(
    State(state): State<AppState>,
    params: Result<Query<TodoParams>, QueryRejection>,
) -> AppResult<Json<Vec<EventRead>>> {
    let Query(params) = params.map_err(|rej| AppError::Validation(rej.body_text()))?;

    let events = with_session(&state, move |session| list_todo(session, !params.all)).await?;
    Ok(Json(events))
}

pub async fn get_todo_split(State(state): State<AppState>) -> AppResult<Json<TodoSplit>> {
    let split = with_session(&state, |session| split_todo_by_current_week(session)).await?;
    Ok(Json(split))
}

pub async fn get_event_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventRead>> {
    let ev = with_session(&state, move |session| get_event(session, id)).await?;
    ev.map(Json).ok_or(AppError::NotFound(id))
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteRequest {
    pub completed_at: Option<DateTime<Utc>>,
}

/// The body is optional; an empty body completes the event now.
pub async fn complete_event_endpoint(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<EventRead>> {
    let req: CompleteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CompleteRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::Validation(e.to_string()))?
    };

    let ev = with_session(&state, move |session| {
        mark_event_completed(session, id, req.completed_at)
    })
    .await?;
    info!(id, "POST /event/{{id}}/complete");
    Ok(Json(ev))
}
