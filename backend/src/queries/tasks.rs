use chrono::Utc;
use uuid::Uuid;

use super::{from_document, from_documents, to_document};
use crate::Store;
use crate::{
    database::{Collection, Filter},
    error::{Error, Result},
    models::{
        ownership::Owner,
        tasks::{NewTask, Task},
    },
};

pub async fn create_task(store: &Store, new_task: NewTask) -> Result<Task> {
    let now = Utc::now();
    let task = Task {
        id: Uuid::now_v7(),
        name: new_task.name,
        description: new_task.description,
        board_id: new_task.board_id,
        owned_by: new_task.owned_by,
        author_id: new_task.author_id,
        assigned_to: None,
        deadline: new_task.deadline,
        completed_at: None,
        created_at: now,
        updated_at: now,
    };

    store
        .insert(Collection::Tasks, task.id, to_document(&task)?)
        .await?;

    Ok(task)
}

/// Gets a single task by its ID. The task may not exist.
pub async fn get_task_by_id(store: &Store, id: Uuid) -> Result<Option<Task>> {
    store
        .find_one(Collection::Tasks, &Filter::by_id(id))
        .await?
        .map(from_document)
        .transpose()
}

/// Lists tasks belonging to `owner`, optionally restricted to one board.
pub async fn list_tasks_by_owner(
    store: &Store,
    owner: Owner,
    board_id: Option<Uuid>,
) -> Result<Vec<Task>> {
    let mut filter = Filter::all().eq("owned_by", owner);
    if let Some(board_id) = board_id {
        filter = filter.eq("board_id", board_id);
    }
    from_documents(store.find(Collection::Tasks, &filter).await?)
}

pub async fn list_tasks(store: &Store) -> Result<Vec<Task>> {
    from_documents(store.find(Collection::Tasks, &Filter::all()).await?)
}

pub async fn update_task(store: &Store, task: &Task) -> Result<()> {
    let replaced = store
        .replace(Collection::Tasks, task.id, to_document(task)?)
        .await?;
    if !replaced {
        return Err(Error::NotFound("Task not found".to_string()));
    }
    Ok(())
}

/// Deletes a task by ID. Returns whether a task was removed.
pub async fn delete_task(store: &Store, id: Uuid) -> Result<bool> {
    Ok(store.delete(Collection::Tasks, &Filter::by_id(id)).await? > 0)
}

/// Deletes a task only while it is still on `board_id`.
pub async fn delete_task_on_board(store: &Store, id: Uuid, board_id: Uuid) -> Result<bool> {
    let filter = Filter::by_id(id).eq("board_id", board_id);
    Ok(store.delete(Collection::Tasks, &filter).await? > 0)
}

/// Unassigns `user_id` from every task, or only from tasks of `owner`.
/// Returns how many tasks were changed.
pub async fn clear_assignee(store: &Store, user_id: Uuid, owner: Option<Owner>) -> Result<u64> {
    let mut filter = Filter::all().eq("assigned_to", user_id);
    if let Some(owner) = owner {
        filter = filter.eq("owned_by", owner);
    }

    let mut cleared = 0;
    for mut task in from_documents::<Task>(store.find(Collection::Tasks, &filter).await?)? {
        task.assigned_to = None;
        task.updated_at = Utc::now();
        // A task deleted in the meantime needs no unassigning.
        match update_task(store, &task).await {
            Ok(()) => cleared += 1,
            Err(Error::NotFound(_)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(cleared)
}

/// Deletes every task on a board and returns how many were removed.
pub async fn delete_tasks_by_board(store: &Store, board_id: Uuid) -> Result<u64> {
    store
        .delete(Collection::Tasks, &Filter::all().eq("board_id", board_id))
        .await
}

/// Deletes every task belonging to `owner` and returns how many were removed.
pub async fn delete_tasks_by_owner(store: &Store, owner: Owner) -> Result<u64> {
    store
        .delete(Collection::Tasks, &Filter::all().eq("owned_by", owner))
        .await
}
