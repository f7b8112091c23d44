//! Request handlers for `/tasks` and `/health`.
//!
//! Each handler checks the wire shape of its input, calls exactly one
//! service operation and maps the outcome through [`ApiError`].
//!
//! An empty request body reads as `{}` whatever its content type, so a
//! bare `PUT` is an empty patch.

use super::{ApiError, dto};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{TaskService, ValidationErrors, combine},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use mockable::Clock;
use serde_json::{Map, Value, json};

const INVALID_ID: &str = "Task id must be an integer";
const MISSING_JSON_CONTENT_TYPE: &str = "Expected request with `Content-Type: application/json`";

/// `GET /tasks`: every task, newest first.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] when the store fails.
pub async fn list_tasks<R, C>(
    State(service): State<TaskService<R, C>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(service.list().await?))
}

/// `POST /tasks`: creates a task and answers `201 Created`.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a malformed body or invalid title,
/// or [`ApiError::Internal`] when the store fails.
pub async fn create_task<R, C>(
    State(service): State<TaskService<R, C>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = dto::parse_create(json_body(&headers, &body)?)?;
    let task = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/{id}`: applies a partial update.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] listing every problem with the id and
/// the body, [`ApiError::NotFound`] when no task has the id, or
/// [`ApiError::Internal`] when the store fails.
pub async fn update_task<R, C>(
    State(service): State<TaskService<R, C>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Task>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let (id, request) = combine(
        path_id(&raw_id),
        json_body(&headers, &body).and_then(dto::parse_update),
    )?;
    Ok(Json(service.update(id, request).await?))
}

/// `DELETE /tasks/{id}`: permanently removes a task.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a non-integer id,
/// [`ApiError::NotFound`] when no task has the id, or
/// [`ApiError::Internal`] when the store fails.
pub async fn delete_task<R, C>(
    State(service): State<TaskService<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = path_id(&raw_id)?;
    service.delete(id).await?;
    Ok(Json(json!({ "message": "Task deleted" })))
}

/// `GET /health`: liveness only, never touches storage.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn path_id(raw: &str) -> Result<TaskId, ValidationErrors> {
    raw.parse()
        .map_err(|_| ValidationErrors::single("id", INVALID_ID))
}

fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ValidationErrors> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    if !has_json_content_type(headers) {
        tracing::debug!("rejected request body without a JSON content type");
        return Err(ValidationErrors::single("body", MISSING_JSON_CONTENT_TYPE));
    }
    Json::<Value>::from_bytes(body)
        .map(|Json(value)| value)
        .map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "rejected request body");
            ValidationErrors::single("body", rejection.body_text())
        })
}

/// Accepts `application/json` and `application/*+json`, ignoring parameters.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .and_then(|essence| essence.trim().split_once('/'))
        .is_some_and(|(kind, subtype)| {
            kind.eq_ignore_ascii_case("application")
                && (subtype.eq_ignore_ascii_case("json")
                    || subtype.to_ascii_lowercase().ends_with("+json"))
        })
}
