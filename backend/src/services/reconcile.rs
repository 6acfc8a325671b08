//! Orphan reconciliation.
//!
//! Cascading deletes span several documents and are not atomic, so an
//! interrupted cascade can leave boards, tasks or member entries pointing at
//! something that no longer exists. `remove_orphans` sweeps those up and
//! unassigns tasks from deleted users.
//!
//! Collections are read children first (tasks, boards, workspaces, users).
//! A parent created while the sweep runs therefore always shows up in a later
//! snapshot than its children, and fresh data is never taken for an orphan.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::Store;
use crate::{
    error::Result,
    models::ownership::Owner,
    queries::{boards, tasks, users, workspaces},
};

/// Counts of what a sweep removed
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct OrphanReport {
    pub tasks_removed: u64,
    pub boards_removed: u64,
    pub members_pruned: u64,
    pub assignments_cleared: u64,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn owner_exists(owner: Owner, users: &HashSet<Uuid>, workspaces: &HashSet<Uuid>) -> bool {
    match owner {
        Owner::User(id) => users.contains(&id),
        Owner::Workspace(id) => workspaces.contains(&id),
    }
}

/// Removes tasks without a board or owner, boards without an owner, and
/// member entries and task assignments for deleted users
///
/// Workspace owners are never pruned from their member list; a workspace
/// whose owner is gone is only logged.
pub async fn remove_orphans(store: &Store) -> Result<OrphanReport> {
    let all_tasks = tasks::list_tasks(store).await?;
    let all_boards = boards::list_boards(store).await?;
    let all_workspaces = workspaces::list_workspaces(store).await?;
    let user_ids: HashSet<Uuid> = users::list_users(store)
        .await?
        .into_iter()
        .map(|user| user.id)
        .collect();

    let board_ids: HashSet<Uuid> = all_boards.iter().map(|board| board.id).collect();
    let workspace_ids: HashSet<Uuid> = all_workspaces.iter().map(|ws| ws.id).collect();

    let mut report = OrphanReport::default();

    for task in &all_tasks {
        let orphaned = !board_ids.contains(&task.board_id)
            || !owner_exists(task.owned_by, &user_ids, &workspace_ids);
        // A task moved off the snapshot's board since the read is left alone.
        if orphaned && tasks::delete_task_on_board(store, task.id, task.board_id).await? {
            tracing::debug!(task_id = %task.id, "Removed orphaned task");
            report.tasks_removed += 1;
        }
    }

    let stale_assignees: HashSet<Uuid> = all_tasks
        .iter()
        .filter_map(|task| task.assigned_to)
        .filter(|assignee| !user_ids.contains(assignee))
        .collect();
    for assignee in stale_assignees {
        report.assignments_cleared += tasks::clear_assignee(store, assignee, None).await?;
    }

    for board in &all_boards {
        if owner_exists(board.owned_by, &user_ids, &workspace_ids) {
            continue;
        }
        // Tasks created on this board after the task snapshot go with it.
        report.tasks_removed += tasks::delete_tasks_by_board(store, board.id).await?;
        if boards::delete_board(store, board.id).await? {
            tracing::debug!(board_id = %board.id, "Removed orphaned board");
            report.boards_removed += 1;
        }
    }

    for snapshot in &all_workspaces {
        if !user_ids.contains(&snapshot.owner_id) {
            tracing::warn!(
                workspace_id = %snapshot.id,
                owner_id = %snapshot.owner_id,
                "Workspace owner no longer exists",
            );
        }
        if snapshot
            .members
            .iter()
            .all(|member| *member == snapshot.owner_id || user_ids.contains(member))
        {
            continue;
        }
        // Re-read so a concurrent invite acceptance is not overwritten.
        let Some(mut workspace) = workspaces::get_workspace_by_id(store, snapshot.id).await? else {
            continue;
        };
        let before = workspace.members.len();
        let owner_id = workspace.owner_id;
        workspace.members.retain(|member| {
            *member == owner_id || user_ids.contains(member) || !snapshot.members.contains(member)
        });
        let pruned = (before - workspace.members.len()) as u64;
        if pruned > 0 {
            workspace.updated_at = Utc::now();
            workspaces::update_workspace(store, &workspace).await?;
            report.members_pruned += pruned;
        }
    }

    Ok(report)
}
