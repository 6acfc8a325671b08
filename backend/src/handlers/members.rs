//! Workspace membership handlers
//!
//! Invites, joining, kick, promote, leave and task assignment. Assignment
//! lives here because its authorization is a membership rule.

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::{
        extract::{Json, Path},
        log_handler_error,
    },
    middleware::auth::AuthenticatedUser,
    models::workspace_members::{AssignTaskRequest, MemberTargetRequest},
    services::{tasks, workspace_members},
    state::AppState,
};

// ============================================================================
// INVITES
// ============================================================================

/// POST /api/v1/workspaces/{workspace_id}/invite
///
/// Mints an invite token for the workspace. Owner only.
///
/// # HTTP Status Codes
/// - `200 OK`: `{"token": ..., "expires_at": ...}`
/// - `403 FORBIDDEN`: Caller is not the owner
/// - `404 NOT_FOUND`: Workspace not found
pub async fn create_invite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let invite = workspace_members::create_invite(
        state.store.as_ref(),
        &state.config.jwt,
        workspace_id,
        auth_user.id,
    )
    .await
    .inspect_err(|e| log_handler_error("create_invite", e))?;

    tracing::info!(
        operation = "create_invite",
        workspace_id = %workspace_id,
        user_id = %auth_user.id,
        "Invite created",
    );

    Ok(Json(serde_json::json!({
        "token": invite.token,
        "workspace_id": invite.workspace_id,
        "expires_at": invite.expires_at,
    })))
}

/// POST /api/v1/workspaces/invite/accept/{join_token}
///
/// Joins the workspace the invite token was issued for. Joining twice is a no-op.
///
/// # HTTP Status Codes
/// - `200 OK`: Caller is a member
/// - `400 BAD_REQUEST`: Invalid, expired or wrong-type token
/// - `404 NOT_FOUND`: Workspace no longer exists
pub async fn accept_invite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(join_token): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let workspace = workspace_members::accept_invite(
        state.store.as_ref(),
        &state.config.jwt,
        &join_token,
        auth_user.id,
    )
    .await
    .inspect_err(|e| log_handler_error("accept_invite", e))?;

    tracing::info!(
        operation = "accept_invite",
        workspace_id = %workspace.id,
        user_id = %auth_user.id,
        "Invite accepted",
    );

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

// ============================================================================
// MEMBERS
// ============================================================================

/// GET /api/v1/workspaces/{workspace_id}/members
///
/// # HTTP Status Codes
/// - `200 OK`: Member profiles
/// - `403 FORBIDDEN`: Caller is not a member
/// - `404 NOT_FOUND`: Workspace not found
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let members = workspace_members::list_members(state.store.as_ref(), workspace_id, auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("list_members", e))?;

    Ok(Json(serde_json::json!({
        "members": members,
        "count": members.len(),
    })))
}

/// POST /api/v1/workspaces/{workspace_id}/kick
///
/// # Request Body
/// - `id`: User to remove
///
/// # HTTP Status Codes
/// - `200 OK`: Member removed
/// - `400 BAD_REQUEST`: Target is the owner
/// - `403 FORBIDDEN`: Caller is not the owner
/// - `404 NOT_FOUND`: Workspace not found or target not a member
pub async fn kick_member(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<MemberTargetRequest>,
) -> Result<Json<serde_json::Value>> {
    let workspace = workspace_members::kick_member(
        state.store.as_ref(),
        workspace_id,
        auth_user.id,
        request.id,
    )
    .await
    .inspect_err(|e| log_handler_error("kick_member", e))?;

    tracing::info!(
        operation = "kick_member",
        workspace_id = %workspace_id,
        target_user_id = %request.id,
        "Member kicked",
    );

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

/// POST /api/v1/workspaces/{workspace_id}/promote
///
/// Transfers ownership to another member.
///
/// # Request Body
/// - `id`: Member to promote
///
/// # HTTP Status Codes
/// - `200 OK`: Ownership transferred
/// - `400 BAD_REQUEST`: Target is not a member, or is the caller
/// - `403 FORBIDDEN`: Caller is not the owner
pub async fn promote_member(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<MemberTargetRequest>,
) -> Result<Json<serde_json::Value>> {
    let workspace = workspace_members::promote_member(
        state.store.as_ref(),
        workspace_id,
        auth_user.id,
        request.id,
    )
    .await
    .inspect_err(|e| log_handler_error("promote_member", e))?;

    tracing::info!(
        operation = "promote_member",
        workspace_id = %workspace_id,
        new_owner_id = %request.id,
        previous_owner_id = %auth_user.id,
        "Ownership transferred",
    );

    Ok(Json(serde_json::json!({ "workspace": workspace })))
}

/// POST /api/v1/workspaces/{workspace_id}/leave
///
/// # HTTP Status Codes
/// - `200 OK`: Caller left
/// - `400 BAD_REQUEST`: Caller is the owner
/// - `403 FORBIDDEN`: Caller is not a member
pub async fn leave_workspace(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    workspace_members::leave_workspace(state.store.as_ref(), workspace_id, auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("leave_workspace", e))?;

    tracing::info!(
        operation = "leave_workspace",
        workspace_id = %workspace_id,
        user_id = %auth_user.id,
        "Member left workspace",
    );

    Ok(Json(serde_json::json!({ "message": "Left workspace" })))
}

// ============================================================================
// ASSIGN TASK
// ============================================================================

/// POST /api/v1/workspaces/{workspace_id}/assign
///
/// # Request Body
/// - `task_id`: Workspace task
/// - `user_id`: Assignee; non-owners may only assign themselves
///
/// # HTTP Status Codes
/// - `200 OK`: Updated task
/// - `400 BAD_REQUEST`: Assignee is not a member
/// - `403 FORBIDDEN`: Not allowed to assign, or task belongs elsewhere
/// - `404 NOT_FOUND`: Workspace or task not found
pub async fn assign_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<AssignTaskRequest>,
) -> Result<Json<serde_json::Value>> {
    let task = tasks::assign_task(state.store.as_ref(), workspace_id, auth_user.id, request)
        .await
        .inspect_err(|e| log_handler_error("assign_task", e))?;

    tracing::info!(
        operation = "assign_task",
        workspace_id = %workspace_id,
        task_id = %task.id,
        "Task assigned",
    );

    Ok(Json(serde_json::json!({ "task": task })))
}
