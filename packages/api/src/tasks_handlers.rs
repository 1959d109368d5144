// ABOUTME: HTTP request handlers for task operations
// ABOUTME: Handles list/create/retrieve/update/delete for tasks over the repository

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    Json,
};
use serde_json::Value;
use taskbot_core::{validate_task_create, validate_task_update, Task};
use tracing::info;

use crate::error::{ApiResult, AppError};
use crate::pagination::{total_pages, PaginatedResponse, PaginationParams};
use crate::DbState;

/// Path ids that are not integers never match a task
fn parse_task_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

/// Absolute URL of the current path, used for pagination links
fn request_base_url(headers: &HeaderMap, uri: &Uri) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, uri.path()),
        None => uri.path().to_string(),
    }
}

/// List tasks, ten per page
pub async fn list_tasks(
    State(db): State<DbState>,
    Query(pagination): Query<PaginationParams>,
    headers: HeaderMap,
    uri: Uri,
) -> ApiResult<Json<PaginatedResponse<Task>>> {
    let page = pagination.page().ok_or(AppError::InvalidPage)?;
    let offset = PaginationParams::offset(page).ok_or(AppError::InvalidPage)?;
    info!("Listing tasks (page: {})", page);

    let (tasks, total) = db
        .task_storage
        .list_tasks_paginated(PaginationParams::limit(), offset)
        .await?;

    if page > total_pages(total) {
        return Err(AppError::InvalidPage);
    }

    let base_url = request_base_url(&headers, &uri);
    Ok(Json(PaginatedResponse::new(tasks, page, total, &base_url)))
}

/// Create a new task
pub async fn create_task(
    State(db): State<DbState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(body) = payload?;
    let input = validate_task_create(&body)?;
    info!("Creating task '{}'", input.title);

    let task = db.task_storage.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a single task by ID
pub async fn get_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(&task_id)?;
    info!("Getting task: {}", task_id);

    let task = db.task_storage.get_task(task_id).await?;
    Ok(Json(task))
}

/// Partially update a task (PATCH)
pub async fn update_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    apply_update(db, &task_id, payload, true).await
}

/// Replace every writable field of a task (PUT)
pub async fn replace_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    apply_update(db, &task_id, payload, false).await
}

async fn apply_update(
    db: DbState,
    task_id: &str,
    payload: Result<Json<Value>, JsonRejection>,
    partial: bool,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(task_id)?;
    info!("Updating task: {} (partial: {})", task_id, partial);

    // An unknown id wins over a bad body
    db.task_storage.get_task(task_id).await?;

    let Json(body) = payload?;
    let input = validate_task_update(&body, partial)?;

    let task = db.task_storage.update_task(task_id, input).await?;
    Ok(Json(task))
}

/// Delete a task
pub async fn delete_task(
    State(db): State<DbState>,
    Path(task_id): Path<String>,
) -> ApiResult<StatusCode> {
    let task_id = parse_task_id(&task_id)?;
    info!("Deleting task: {}", task_id);

    db.task_storage.delete_task(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
