//! Task handlers
//!
//! Mounted under `/tasks` and `/workspaces/{workspace_id}/tasks`, mirroring
//! the board handlers.

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::{
        extract::{Json, Path, Query},
        log_handler_error,
    },
    middleware::auth::AuthenticatedUser,
    models::{
        ownership::Scope,
        tasks::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
    },
    services::tasks,
    state::AppState,
};

async fn create_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    request: CreateTaskRequest,
) -> Result<Json<serde_json::Value>> {
    let task = tasks::create_task(state.store.as_ref(), user.id, scope, request)
        .await
        .inspect_err(|e| log_handler_error("create_task", e))?;

    tracing::info!(
        operation = "create_task",
        task_id = %task.id,
        board_id = %task.board_id,
        owner = %task.owned_by,
        "Task created",
    );

    Ok(Json(serde_json::json!({ "task": task })))
}

async fn list_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    query: TaskListQuery,
) -> Result<Json<serde_json::Value>> {
    let tasks = tasks::list_tasks(state.store.as_ref(), user.id, scope, query.board_id)
        .await
        .inspect_err(|e| log_handler_error("list_tasks", e))?;

    Ok(Json(serde_json::json!({
        "tasks": tasks,
        "count": tasks.len(),
    })))
}

async fn update_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    task_id: Uuid,
    request: UpdateTaskRequest,
) -> Result<Json<serde_json::Value>> {
    let task = tasks::update_task(state.store.as_ref(), user.id, scope, task_id, request)
        .await
        .inspect_err(|e| log_handler_error("update_task", e))?;

    tracing::info!(operation = "update_task", task_id = %task_id, "Task updated");
    Ok(Json(serde_json::json!({ "task": task })))
}

async fn delete_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    task_id: Uuid,
) -> Result<Json<serde_json::Value>> {
    tasks::delete_task(state.store.as_ref(), user.id, scope, task_id)
        .await
        .inspect_err(|e| log_handler_error("delete_task", e))?;

    tracing::info!(operation = "delete_task", task_id = %task_id, "Task deleted");
    Ok(Json(serde_json::json!({ "message": "Task deleted" })))
}

// ============================================================================
// PERSONAL TASKS
// ============================================================================

/// POST /api/v1/tasks
///
/// # Request Body
/// - `name`: Task name
/// - `description`: Optional description
/// - `board_id` (or `board`): Board the task lives on
/// - `deadline`: Optional RFC 3339 timestamp, must be in the future
///
/// # HTTP Status Codes
/// - `200 OK`: Task created
/// - `400 BAD_REQUEST`: Empty name, past deadline or missing board
/// - `403 FORBIDDEN`: Board belongs to another owner
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<serde_json::Value>> {
    create_in(&state, &auth_user, Scope::Personal, request).await
}

/// GET /api/v1/tasks?board={board_id}
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<serde_json::Value>> {
    list_in(&state, &auth_user, Scope::Personal, query).await
}

/// PATCH /api/v1/tasks/{task_id}
///
/// Partial update: name, description, deadline, completion, board.
///
/// # HTTP Status Codes
/// - `200 OK`: Task updated
/// - `400 BAD_REQUEST`: Past deadline, empty name or missing board
/// - `403 FORBIDDEN`: Task or target board is not the caller's
/// - `404 NOT_FOUND`: Task not found
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<serde_json::Value>> {
    update_in(&state, &auth_user, Scope::Personal, task_id, request).await
}

/// DELETE /api/v1/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    delete_in(&state, &auth_user, Scope::Personal, task_id).await
}

// ============================================================================
// WORKSPACE TASKS
// ============================================================================

/// POST /api/v1/workspaces/{workspace_id}/tasks
pub async fn create_workspace_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<serde_json::Value>> {
    create_in(&state, &auth_user, Scope::Workspace(workspace_id), request).await
}

/// GET /api/v1/workspaces/{workspace_id}/tasks?board={board_id}
pub async fn list_workspace_tasks(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<serde_json::Value>> {
    list_in(&state, &auth_user, Scope::Workspace(workspace_id), query).await
}

/// PATCH /api/v1/workspaces/{workspace_id}/tasks/{task_id}
pub async fn update_workspace_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((workspace_id, task_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<serde_json::Value>> {
    update_in(&state, &auth_user, Scope::Workspace(workspace_id), task_id, request).await
}

/// DELETE /api/v1/workspaces/{workspace_id}/tasks/{task_id}
pub async fn delete_workspace_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((workspace_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    delete_in(&state, &auth_user, Scope::Workspace(workspace_id), task_id).await
}
