//! Ownership resolver.
//!
//! Every board and task route is served in a scope: personal (`/boards`) or
//! workspace (`/workspaces/{workspace_id}/boards`). The resolver turns the
//! requester plus the scope into the `Owner` the requester is acting as, and
//! a resource is accessible only if it is owned by exactly that owner.

use uuid::Uuid;

use crate::Store;
use crate::{
    error::{Error, Result},
    models::{
        ownership::{OwnedResource, Owner, Scope},
        workspaces::Workspace,
    },
    queries::workspaces,
};

/// Loads a workspace, failing with `NotFound` if it does not exist.
pub async fn load_workspace(store: &Store, workspace_id: Uuid) -> Result<Workspace> {
    workspaces::get_workspace_by_id(store, workspace_id)
        .await?
        .ok_or_else(|| Error::NotFound("Workspace not found".to_string()))
}

/// Loads a workspace the user must be owner or member of.
pub async fn require_workspace_member(
    store: &Store,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<Workspace> {
    let workspace = load_workspace(store, workspace_id).await?;
    if !workspace.is_member(user_id) {
        return Err(Error::Forbidden(
            "You are not a member of this workspace".to_string(),
        ));
    }
    Ok(workspace)
}

/// Loads a workspace the user must own.
pub async fn require_workspace_owner(
    store: &Store,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<Workspace> {
    let workspace = load_workspace(store, workspace_id).await?;
    if !workspace.is_owner(user_id) {
        return Err(Error::Forbidden(
            "Only the workspace owner can perform this action".to_string(),
        ));
    }
    Ok(workspace)
}

/// Resolves the owner the requester acts as in `scope`
///
/// Personal scope is always the requester themselves. Workspace scope
/// requires the workspace to exist (404) and the requester to belong to it (403).
pub async fn resolve_owner(store: &Store, user_id: Uuid, scope: Scope) -> Result<Owner> {
    match scope {
        Scope::Personal => Ok(Owner::User(user_id)),
        Scope::Workspace(workspace_id) => {
            require_workspace_member(store, workspace_id, user_id).await?;
            Ok(Owner::Workspace(workspace_id))
        }
    }
}

/// Fails with `Forbidden` unless `resource` belongs to `owner`.
pub fn ensure_owned_by<R: OwnedResource>(resource: &R, owner: Owner) -> Result<()> {
    if resource.owned_by() != owner {
        return Err(Error::Forbidden(format!(
            "{} {} is not accessible from this scope",
            R::RESOURCE,
            resource.id()
        )));
    }
    Ok(())
}
