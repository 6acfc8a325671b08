use chrono::Utc;
use uuid::Uuid;

use crate::Store;
use crate::{
    error::{Error, Result},
    models::{
        boards::Board,
        ownership::{Owner, Scope},
        tasks::{CreateTaskRequest, NewTask, Task, UpdateTaskRequest},
        workspace_members::AssignTaskRequest,
    },
    queries::{boards, tasks},
    services::ownership::{ensure_owned_by, require_workspace_member, resolve_owner},
    validation::{validate_deadline, validate_required_string},
};

/// Loads the board a task should live on
///
/// A missing board is a bad request; a board of another owner is forbidden.
async fn target_board(store: &Store, board_id: Uuid, owner: Owner) -> Result<Board> {
    let board = boards::get_board_by_id(store, board_id)
        .await?
        .ok_or_else(|| Error::validation("board_id", "Board does not exist"))?;
    ensure_owned_by(&board, owner)?;
    Ok(board)
}

/// Creates a task on an existing board of the same owner
pub async fn create_task(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    request: CreateTaskRequest,
) -> Result<Task> {
    let owned_by = resolve_owner(store, user_id, scope).await?;
    let name = validate_required_string(&request.name, "name")?;
    if let Some(deadline) = request.deadline {
        validate_deadline(deadline)?;
    }
    target_board(store, request.board_id, owned_by).await?;

    let description = request
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    tasks::create_task(
        store,
        NewTask {
            name,
            description,
            board_id: request.board_id,
            owned_by,
            author_id: user_id,
            deadline: request.deadline,
        },
    )
    .await
}

/// Lists tasks in `scope`, optionally only those on one board
pub async fn list_tasks(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    board_id: Option<Uuid>,
) -> Result<Vec<Task>> {
    let owner = resolve_owner(store, user_id, scope).await?;
    tasks::list_tasks_by_owner(store, owner, board_id).await
}

/// Loads a task and checks it is accessible from `scope`
pub async fn get_task(store: &Store, user_id: Uuid, scope: Scope, task_id: Uuid) -> Result<Task> {
    let owner = resolve_owner(store, user_id, scope).await?;
    let task = tasks::get_task_by_id(store, task_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;
    ensure_owned_by(&task, owner)?;
    Ok(task)
}

/// Applies a partial update to a task
///
/// A new deadline must lie in the future. Moving to another board requires
/// that board to exist under the same owner.
pub async fn update_task(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    task_id: Uuid,
    request: UpdateTaskRequest,
) -> Result<Task> {
    let mut task = get_task(store, user_id, scope, task_id).await?;

    if let Some(name) = request.name {
        task.name = validate_required_string(&name, "name")?;
    }

    if let Some(description) = request.description {
        let description = description.trim();
        task.description = (!description.is_empty()).then(|| description.to_string());
    }

    if let Some(deadline) = request.deadline {
        validate_deadline(deadline)?;
        task.deadline = Some(deadline);
    }

    match request.completed {
        Some(true) if task.completed_at.is_none() => task.completed_at = Some(Utc::now()),
        Some(false) => task.completed_at = None,
        _ => {}
    }

    if let Some(board_id) = request.board_id {
        if board_id != task.board_id {
            target_board(store, board_id, task.owned_by).await?;
            task.board_id = board_id;
        }
    }

    task.updated_at = Utc::now();
    tasks::update_task(store, &task).await?;
    Ok(task)
}

pub async fn delete_task(store: &Store, user_id: Uuid, scope: Scope, task_id: Uuid) -> Result<()> {
    get_task(store, user_id, scope, task_id).await?;

    if !tasks::delete_task(store, task_id).await? {
        return Err(Error::NotFound("Task not found".to_string()));
    }
    Ok(())
}

/// Assigns a workspace task to a member
///
/// The owner may assign anyone; other members may only assign themselves.
/// The assignee must belong to the workspace.
pub async fn assign_task(
    store: &Store,
    workspace_id: Uuid,
    requester_id: Uuid,
    request: AssignTaskRequest,
) -> Result<Task> {
    let workspace = require_workspace_member(store, workspace_id, requester_id).await?;

    let mut task = tasks::get_task_by_id(store, request.task_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;
    ensure_owned_by(&task, Owner::Workspace(workspace_id))?;

    if !workspace.is_owner(requester_id) && request.user_id != requester_id {
        return Err(Error::Forbidden(
            "Only the workspace owner can assign tasks to other members".to_string(),
        ));
    }

    if !workspace.is_member(request.user_id) {
        return Err(Error::validation(
            "user_id",
            "Assignee is not a member of this workspace",
        ));
    }

    task.assigned_to = Some(request.user_id);
    task.updated_at = Utc::now();
    tasks::update_task(store, &task).await?;
    Ok(task)
}
