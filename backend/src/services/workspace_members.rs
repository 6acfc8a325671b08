use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::Store;
use crate::{
    config::JwtConfig,
    error::{Error, Result},
    models::{
        ownership::Owner,
        users::MemberProfile,
        workspace_members::WorkspaceInvite,
        workspaces::Workspace,
    },
    queries::{tasks, users, workspaces},
    services::{
        jwt::{self, TokenType},
        ownership::{load_workspace, require_workspace_member, require_workspace_owner},
    },
};

/// Mints an invite token for a workspace. Owner only.
pub async fn create_invite(
    store: &Store,
    jwt_config: &JwtConfig,
    workspace_id: Uuid,
    requester_id: Uuid,
) -> Result<WorkspaceInvite> {
    require_workspace_owner(store, workspace_id, requester_id).await?;

    let lifetime = Duration::seconds(jwt_config.invite_token_expiration_seconds);
    let token = jwt::generate_token(
        workspace_id,
        TokenType::Invite,
        jwt_config.secret.expose_secret(),
        lifetime,
    )?;

    Ok(WorkspaceInvite {
        workspace_id,
        token,
        expires_at: Utc::now() + lifetime,
    })
}

/// Redeems an invite token, adding the requester to the workspace
///
/// Redeeming again (or as an existing member) changes nothing.
pub async fn accept_invite(
    store: &Store,
    jwt_config: &JwtConfig,
    invite_token: &str,
    requester_id: Uuid,
) -> Result<Workspace> {
    let workspace_id = jwt::verify_invite_token(invite_token, jwt_config.secret.expose_secret())?;
    let mut workspace = load_workspace(store, workspace_id).await?;

    if workspace.is_member(requester_id) {
        return Ok(workspace);
    }

    workspace.members.push(requester_id);
    workspace.updated_at = Utc::now();
    workspaces::update_workspace(store, &workspace).await?;

    Ok(workspace)
}

/// Lists member profiles. Requires membership.
pub async fn list_members(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
) -> Result<Vec<MemberProfile>> {
    let workspace = require_workspace_member(store, workspace_id, requester_id).await?;
    let members = users::get_users_by_ids(store, &workspace.members).await?;
    Ok(members.iter().map(MemberProfile::from).collect())
}

/// Removes a member from the workspace and unassigns them from its tasks.
/// Owner only; the owner cannot be kicked.
pub async fn kick_member(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
    target_user_id: Uuid,
) -> Result<Workspace> {
    let mut workspace = require_workspace_owner(store, workspace_id, requester_id).await?;

    if workspace.is_owner(target_user_id) {
        return Err(Error::validation(
            "id",
            "The workspace owner cannot be kicked",
        ));
    }

    if !workspace.members.contains(&target_user_id) {
        return Err(Error::NotFound(
            "User is not a member of this workspace".to_string(),
        ));
    }

    workspace.members.retain(|member| *member != target_user_id);
    workspace.updated_at = Utc::now();
    workspaces::update_workspace(store, &workspace).await?;
    tasks::clear_assignee(store, target_user_id, Some(Owner::Workspace(workspace_id))).await?;

    Ok(workspace)
}

/// Transfers ownership to another member. Owner only.
///
/// The previous owner stays on as a regular member.
pub async fn promote_member(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
    target_user_id: Uuid,
) -> Result<Workspace> {
    let mut workspace = require_workspace_owner(store, workspace_id, requester_id).await?;

    if target_user_id == requester_id {
        return Err(Error::validation("id", "You already own this workspace"));
    }

    if !workspace.members.contains(&target_user_id) {
        return Err(Error::validation(
            "id",
            "Only existing members can be promoted",
        ));
    }

    if !workspace.members.contains(&requester_id) {
        workspace.members.push(requester_id);
    }
    workspace.owner_id = target_user_id;
    workspace.updated_at = Utc::now();
    workspaces::update_workspace(store, &workspace).await?;

    Ok(workspace)
}

/// Leaves a workspace, dropping the caller's assignments on its tasks.
/// The owner has to transfer ownership first.
pub async fn leave_workspace(store: &Store, workspace_id: Uuid, requester_id: Uuid) -> Result<()> {
    let mut workspace = require_workspace_member(store, workspace_id, requester_id).await?;

    if workspace.is_owner(requester_id) {
        return Err(Error::validation(
            "workspace",
            "The owner cannot leave; transfer ownership first",
        ));
    }

    workspace.members.retain(|member| *member != requester_id);
    workspace.updated_at = Utc::now();
    workspaces::update_workspace(store, &workspace).await?;
    tasks::clear_assignee(store, requester_id, Some(Owner::Workspace(workspace_id))).await?;

    Ok(())
}
