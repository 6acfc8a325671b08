//! Board handlers
//!
//! Every operation is mounted twice: under `/boards` for personal boards and
//! under `/workspaces/{workspace_id}/boards` for shared ones. Both variants
//! resolve a `Scope` and share one implementation.

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::{
        extract::{Json, Path},
        log_handler_error,
    },
    middleware::auth::AuthenticatedUser,
    models::{
        boards::{CreateBoardRequest, UpdateBoardRequest},
        ownership::Scope,
    },
    services::boards,
    state::AppState,
};

async fn create_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    request: CreateBoardRequest,
) -> Result<Json<serde_json::Value>> {
    let board = boards::create_board(state.store.as_ref(), user.id, scope, request)
        .await
        .inspect_err(|e| log_handler_error("create_board", e))?;

    tracing::info!(
        operation = "create_board",
        board_id = %board.id,
        owner = %board.owned_by,
        "Board created",
    );

    Ok(Json(serde_json::json!({ "board": board })))
}

async fn list_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
) -> Result<Json<serde_json::Value>> {
    let boards = boards::list_boards(state.store.as_ref(), user.id, scope)
        .await
        .inspect_err(|e| log_handler_error("list_boards", e))?;

    Ok(Json(serde_json::json!({
        "boards": boards,
        "count": boards.len(),
    })))
}

async fn update_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    board_id: Uuid,
    request: UpdateBoardRequest,
) -> Result<Json<serde_json::Value>> {
    let board = boards::update_board(state.store.as_ref(), user.id, scope, board_id, request)
        .await
        .inspect_err(|e| log_handler_error("update_board", e))?;

    tracing::info!(operation = "update_board", board_id = %board_id, "Board updated");
    Ok(Json(serde_json::json!({ "board": board })))
}

async fn delete_in(
    state: &AppState,
    user: &AuthenticatedUser,
    scope: Scope,
    board_id: Uuid,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(
        operation = "delete_board",
        board_id = %board_id,
        user_id = %user.id,
        "Deleting board",
    );

    let deletion = boards::delete_board(state.store.as_ref(), user.id, scope, board_id)
        .await
        .inspect_err(|e| log_handler_error("delete_board", e))?;

    tracing::info!(
        operation = "delete_board",
        board_id = %board_id,
        tasks_deleted = deletion.tasks_deleted,
        "Board deleted",
    );

    Ok(Json(serde_json::json!({
        "message": "Board deleted",
        "deleted": deletion,
    })))
}

// ============================================================================
// PERSONAL BOARDS
// ============================================================================

/// POST /api/v1/boards
///
/// # HTTP Status Codes
/// - `200 OK`: Board created
/// - `400 BAD_REQUEST`: Empty name
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<serde_json::Value>> {
    create_in(&state, &auth_user, Scope::Personal, request).await
}

/// GET /api/v1/boards
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    list_in(&state, &auth_user, Scope::Personal).await
}

/// PATCH /api/v1/boards/{board_id}
///
/// # HTTP Status Codes
/// - `200 OK`: Board renamed
/// - `400 BAD_REQUEST`: Empty name
/// - `403 FORBIDDEN`: Board is not the caller's
/// - `404 NOT_FOUND`: Board not found
pub async fn update_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(board_id): Path<Uuid>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<serde_json::Value>> {
    update_in(&state, &auth_user, Scope::Personal, board_id, request).await
}

/// DELETE /api/v1/boards/{board_id}
///
/// Deletes the board and every task on it.
///
/// # HTTP Status Codes
/// - `200 OK`: Board deleted
/// - `403 FORBIDDEN`: Board is not the caller's
/// - `404 NOT_FOUND`: Board not found
/// - `500 INTERNAL_SERVER_ERROR`: Board deleted but task cascade failed
pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(board_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    delete_in(&state, &auth_user, Scope::Personal, board_id).await
}

// ============================================================================
// WORKSPACE BOARDS
// ============================================================================

/// POST /api/v1/workspaces/{workspace_id}/boards
///
/// # HTTP Status Codes
/// - `200 OK`: Board created
/// - `400 BAD_REQUEST`: Empty name
/// - `403 FORBIDDEN`: Caller is not a member
/// - `404 NOT_FOUND`: Workspace not found
pub async fn create_workspace_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<serde_json::Value>> {
    create_in(&state, &auth_user, Scope::Workspace(workspace_id), request).await
}

/// GET /api/v1/workspaces/{workspace_id}/boards
pub async fn list_workspace_boards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    list_in(&state, &auth_user, Scope::Workspace(workspace_id)).await
}

/// PATCH /api/v1/workspaces/{workspace_id}/boards/{board_id}
pub async fn update_workspace_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateBoardRequest>,
) -> Result<Json<serde_json::Value>> {
    update_in(&state, &auth_user, Scope::Workspace(workspace_id), board_id, request).await
}

/// DELETE /api/v1/workspaces/{workspace_id}/boards/{board_id}
pub async fn delete_workspace_board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path((workspace_id, board_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>> {
    delete_in(&state, &auth_user, Scope::Workspace(workspace_id), board_id).await
}
