use chrono::Utc;
use uuid::Uuid;

use crate::Store;
use crate::{
    error::{Error, Result},
    models::{
        ownership::Owner,
        workspaces::{CreateWorkspaceRequest, NewWorkspace, UpdateWorkspaceRequest, Workspace},
    },
    queries::{boards, tasks, workspaces},
    services::ownership::{require_workspace_member, require_workspace_owner},
    validation::validate_workspace_name,
};

/// Outcome of a workspace deletion
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorkspaceDeletion {
    pub workspace_id: Uuid,
    pub boards_deleted: u64,
    pub tasks_deleted: u64,
}

/// Creates a workspace owned by `owner_id`, who becomes its first member
pub async fn create_workspace(
    store: &Store,
    owner_id: Uuid,
    request: CreateWorkspaceRequest,
) -> Result<Workspace> {
    validate_workspace_name(&request.name)?;
    let name = request.name.trim().to_string();

    if workspaces::get_workspace_by_name(store, &name).await?.is_some() {
        return Err(Error::Conflict("Workspace name is already taken".to_string()));
    }

    workspaces::create_workspace(store, NewWorkspace { name, owner_id }).await
}

/// Lists all workspaces where the user is owner or member
pub async fn list_user_workspaces(store: &Store, user_id: Uuid) -> Result<Vec<Workspace>> {
    workspaces::list_workspaces_for_member(store, user_id).await
}

/// Gets a workspace the user belongs to
pub async fn get_workspace(store: &Store, workspace_id: Uuid, user_id: Uuid) -> Result<Workspace> {
    require_workspace_member(store, workspace_id, user_id).await
}

/// Renames a workspace or changes its avatar. Owner only.
pub async fn update_workspace(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
    request: UpdateWorkspaceRequest,
) -> Result<Workspace> {
    let mut workspace = require_workspace_owner(store, workspace_id, requester_id).await?;

    if let Some(name) = request.name {
        validate_workspace_name(&name)?;
        let name = name.trim().to_string();
        if name != workspace.name {
            if let Some(existing) = workspaces::get_workspace_by_name(store, &name).await? {
                if existing.id != workspace.id {
                    return Err(Error::Conflict("Workspace name is already taken".to_string()));
                }
            }
            workspace.name = name;
        }
    }

    if let Some(avatar) = request.avatar {
        let avatar = avatar.trim();
        workspace.avatar = (!avatar.is_empty()).then(|| avatar.to_string());
    }

    workspace.updated_at = Utc::now();
    workspaces::update_workspace(store, &workspace).await?;
    Ok(workspace)
}

/// Deletes a workspace together with its boards and tasks. Owner only.
///
/// The workspace document goes first; if removing its boards or tasks fails
/// afterwards the caller gets `PartialFailure` and the orphan cleanup worker
/// removes the leftovers.
pub async fn delete_workspace(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
) -> Result<WorkspaceDeletion> {
    require_workspace_owner(store, workspace_id, requester_id).await?;

    if !workspaces::delete_workspace(store, workspace_id).await? {
        return Err(Error::NotFound("Workspace not found".to_string()));
    }

    let owner = Owner::Workspace(workspace_id);
    let cascade = async {
        let tasks_deleted = tasks::delete_tasks_by_owner(store, owner).await?;
        let boards_deleted = boards::delete_boards_by_owner(store, owner).await?;
        Ok::<_, Error>((tasks_deleted, boards_deleted))
    };

    let (tasks_deleted, boards_deleted) = cascade.await.map_err(|e| {
        tracing::error!(
            workspace_id = %workspace_id,
            error = %e,
            "Workspace deleted but cascade failed",
        );
        Error::PartialFailure(
            "Workspace deleted but some of its boards or tasks could not be removed".to_string(),
        )
    })?;

    Ok(WorkspaceDeletion {
        workspace_id,
        boards_deleted,
        tasks_deleted,
    })
}
