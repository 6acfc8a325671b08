//! Workspace CRUD handlers
//!
//! Handlers are a thin layer: they pull the caller and inputs out of the
//! request, delegate to the services and wrap the result in JSON.

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::{
        extract::{Json, Path},
        log_handler_error,
    },
    middleware::auth::AuthenticatedUser,
    models::workspaces::{CreateWorkspaceRequest, UpdateWorkspaceRequest},
    services::workspaces,
    state::AppState,
};

// ============================================================================
// CREATE WORKSPACE
// ============================================================================

/// POST /api/v1/workspaces/create
///
/// Creates a workspace owned by the caller, who becomes its first member.
///
/// # Request Body
/// - `name`: Workspace name (unique)
///
/// # HTTP Status Codes
/// - `200 OK`: Workspace created
/// - `400 BAD_REQUEST`: Invalid name
/// - `409 CONFLICT`: Name already taken
pub async fn create_workspace(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(operation = "create_workspace", user_id = %auth_user.id, "Creating workspace");

    let workspace = workspaces::create_workspace(state.store.as_ref(), auth_user.id, request)
        .await
        .inspect_err(|e| log_handler_error("create_workspace", e))?;

    tracing::info!(
        operation = "create_workspace",
        workspace_id = %workspace.id,
        user_id = %auth_user.id,
        "Workspace created",
    );

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

// ============================================================================
// LIST / GET
// ============================================================================

/// GET /api/v1/workspaces
///
/// Lists all workspaces where the caller is owner or member.
pub async fn list_workspaces(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let workspaces = workspaces::list_user_workspaces(state.store.as_ref(), auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("list_workspaces", e))?;

    Ok(Json(serde_json::json!({
        "workspaces": workspaces,
        "count": workspaces.len(),
    })))
}

/// GET /api/v1/workspaces/{workspace_id}
///
/// # HTTP Status Codes
/// - `200 OK`: Workspace returned
/// - `403 FORBIDDEN`: Caller is not a member
/// - `404 NOT_FOUND`: Workspace not found
pub async fn get_workspace(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let workspace = workspaces::get_workspace(state.store.as_ref(), workspace_id, auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("get_workspace", e))?;

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

// ============================================================================
// UPDATE WORKSPACE
// ============================================================================

/// PATCH /api/v1/workspaces/{workspace_id}
///
/// Renames the workspace and/or changes its avatar. Owner only.
///
/// # HTTP Status Codes
/// - `200 OK`: Workspace updated
/// - `400 BAD_REQUEST`: Invalid name
/// - `403 FORBIDDEN`: Caller is not the owner
/// - `404 NOT_FOUND`: Workspace not found
/// - `409 CONFLICT`: Name already taken
pub async fn update_workspace(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<UpdateWorkspaceRequest>,
) -> Result<Json<serde_json::Value>> {
    let workspace =
        workspaces::update_workspace(state.store.as_ref(), workspace_id, auth_user.id, request)
            .await
            .inspect_err(|e| log_handler_error("update_workspace", e))?;

    tracing::info!(
        operation = "update_workspace",
        workspace_id = %workspace_id,
        user_id = %auth_user.id,
        "Workspace updated",
    );

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

// ============================================================================
// DELETE WORKSPACE
// ============================================================================

/// DELETE /api/v1/workspaces/{workspace_id}
///
/// Deletes the workspace with all of its boards and tasks. Owner only.
///
/// # HTTP Status Codes
/// - `200 OK`: Workspace deleted, with cascade counts
/// - `403 FORBIDDEN`: Caller is not the owner
/// - `404 NOT_FOUND`: Workspace not found
/// - `500 INTERNAL_SERVER_ERROR`: Workspace deleted but cascade incomplete
pub async fn delete_workspace(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(
        operation = "delete_workspace",
        workspace_id = %workspace_id,
        user_id = %auth_user.id,
        "Deleting workspace",
    );

    let deletion = workspaces::delete_workspace(state.store.as_ref(), workspace_id, auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("delete_workspace", e))?;

    tracing::info!(
        operation = "delete_workspace",
        workspace_id = %workspace_id,
        boards_deleted = deletion.boards_deleted,
        tasks_deleted = deletion.tasks_deleted,
        "Workspace deleted",
    );

    Ok(Json(serde_json::json!({
        "message": "Workspace deleted",
        "deleted": deletion,
    })))
}
