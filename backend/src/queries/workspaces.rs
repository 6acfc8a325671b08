use chrono::Utc;
use uuid::Uuid;

use super::{from_document, from_documents, to_document};
use crate::Store;
use crate::{
    database::{Collection, Filter},
    error::{Error, Result},
    models::workspaces::{NewWorkspace, Workspace},
};

/// Creates a workspace with the owner as its only member.
pub async fn create_workspace(store: &Store, new_workspace: NewWorkspace) -> Result<Workspace> {
    let now = Utc::now();
    let workspace = Workspace {
        id: Uuid::now_v7(),
        name: new_workspace.name,
        owner_id: new_workspace.owner_id,
        members: vec![new_workspace.owner_id],
        avatar: None,
        created_at: now,
        updated_at: now,
    };

    store
        .insert(Collection::Workspaces, workspace.id, to_document(&workspace)?)
        .await
        .map_err(name_conflict)?;

    Ok(workspace)
}

/// Gets a single workspace by its ID. The workspace may not exist.
pub async fn get_workspace_by_id(store: &Store, id: Uuid) -> Result<Option<Workspace>> {
    store
        .find_one(Collection::Workspaces, &Filter::by_id(id))
        .await?
        .map(from_document)
        .transpose()
}

pub async fn get_workspace_by_name(store: &Store, name: &str) -> Result<Option<Workspace>> {
    store
        .find_one(Collection::Workspaces, &Filter::all().eq("name", name))
        .await?
        .map(from_document)
        .transpose()
}

/// Lists workspaces the user belongs to. The owner is always in `members`.
pub async fn list_workspaces_for_member(store: &Store, user_id: Uuid) -> Result<Vec<Workspace>> {
    from_documents(
        store
            .find(Collection::Workspaces, &Filter::all().contains("members", user_id))
            .await?,
    )
}

pub async fn list_workspaces_owned_by(store: &Store, user_id: Uuid) -> Result<Vec<Workspace>> {
    from_documents(
        store
            .find(Collection::Workspaces, &Filter::all().eq("owner_id", user_id))
            .await?,
    )
}

pub async fn list_workspaces(store: &Store) -> Result<Vec<Workspace>> {
    from_documents(store.find(Collection::Workspaces, &Filter::all()).await?)
}

/// Persists an updated workspace. Fails with `NotFound` if it was deleted meanwhile.
pub async fn update_workspace(store: &Store, workspace: &Workspace) -> Result<()> {
    let replaced = store
        .replace(Collection::Workspaces, workspace.id, to_document(workspace)?)
        .await
        .map_err(name_conflict)?;
    if !replaced {
        return Err(Error::NotFound("Workspace not found".to_string()));
    }
    Ok(())
}

/// Deletes a workspace by ID. Returns whether a workspace was removed.
pub async fn delete_workspace(store: &Store, id: Uuid) -> Result<bool> {
    Ok(store.delete(Collection::Workspaces, &Filter::by_id(id)).await? > 0)
}

fn name_conflict(e: Error) -> Error {
    match e {
        Error::Conflict(_) => Error::Conflict("Workspace name is already taken".to_string()),
        other => other,
    }
}
