use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;
use models::todo;
use service::todo_service::{self, TodoFilter};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub completed: Option<String>,
    pub window: Option<String>,
}

/// Create payload. Unknown keys are rejected at deserialization, before
/// anything touches the store.
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deadline_at: Option<NaiveDateTime>,
}

/// Partial-update payload. `created_at`/`updated_at` are not accepted here;
/// they fall under deny_unknown_fields like any other stray key.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub deadline_at: Option<Option<NaiveDateTime>>,
}

/// Distinguish an absent key (outer `None` via the field default) from an
/// explicit `null` (inner `None`), so updates can clear nullable fields.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[utoipa::path(get, path = "/api/v1/todos", tag = "todos",
    params(
        ("completed" = Option<String>, Query, description = "true/false, case-insensitive"),
        ("window" = Option<i64>, Query, description = "only todos due within this many days")
    ),
    responses((status = 200, description = "OK"), (status = 400, description = "Bad filter")))]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<todo::Model>>, ApiError> {
    let filter = TodoFilter::parse(q.completed.as_deref(), q.window.as_deref())?;
    let todos = todo_service::list_todos(&state.db, &filter).await?;
    info!(count = todos.len(), "list todos");
    Ok(Json(todos))
}

#[utoipa::path(get, path = "/api/v1/todos/{id}", tag = "todos",
    params(("id" = i32, Path, description = "todo id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<todo::Model>, ApiError> {
    match todo_service::get_todo(&state.db, id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(ApiError::NotFound),
    }
}

#[utoipa::path(post, path = "/api/v1/todos", tag = "todos",
    request_body = crate::openapi::CreateTodoInputDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad payload")))]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateTodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<todo::Model>), ApiError> {
    let Json(input) = payload?;
    let created = todo_service::create_todo(
        &state.db,
        &input.title,
        input.description,
        input.completed,
        input.deadline_at,
    )
    .await?;
    info!(id = created.id, title = %created.title, "created todo");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/v1/todos/{id}", tag = "todos",
    params(("id" = i32, Path, description = "todo id")),
    request_body = crate::openapi::UpdateTodoInputDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Bad payload"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateTodoInput>, JsonRejection>,
) -> Result<Json<todo::Model>, ApiError> {
    let Json(input) = payload?;
    let updated = todo_service::update_todo(
        &state.db,
        id,
        input.title.as_deref(),
        input.description,
        input.completed,
        input.deadline_at,
    )
    .await?;
    info!(id = updated.id, "updated todo");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/v1/todos/{id}", tag = "todos",
    params(("id" = i32, Path, description = "todo id")),
    responses((status = 200, description = "Deleted, or absent (no-op)")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    match todo_service::delete_todo(&state.db, id).await? {
        Some(deleted) => {
            info!(id = deleted.id, "deleted todo");
            Ok(Json(deleted).into_response())
        }
        // Deleting an absent id is a no-op success with an empty body
        None => Ok(StatusCode::OK.into_response()),
    }
}
