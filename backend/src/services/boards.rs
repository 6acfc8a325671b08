use chrono::Utc;
use uuid::Uuid;

use crate::Store;
use crate::{
    error::{Error, Result},
    models::{
        boards::{Board, CreateBoardRequest, NewBoard, UpdateBoardRequest},
        ownership::Scope,
    },
    queries::{boards, tasks},
    services::ownership::{ensure_owned_by, resolve_owner},
    validation::validate_required_string,
};

/// Outcome of a board deletion
#[derive(Debug, Clone, serde::Serialize)]
pub struct BoardDeletion {
    pub board_id: Uuid,
    pub tasks_deleted: u64,
}

/// Creates a board owned by the requester or by the workspace in `scope`
pub async fn create_board(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    request: CreateBoardRequest,
) -> Result<Board> {
    let owned_by = resolve_owner(store, user_id, scope).await?;
    let name = validate_required_string(&request.name, "name")?;

    boards::create_board(store, NewBoard { name, owned_by }).await
}

/// Lists the boards visible in `scope`
pub async fn list_boards(store: &Store, user_id: Uuid, scope: Scope) -> Result<Vec<Board>> {
    let owner = resolve_owner(store, user_id, scope).await?;
    boards::list_boards_by_owner(store, owner).await
}

/// Loads a board and checks it is accessible from `scope`
pub async fn get_board(store: &Store, user_id: Uuid, scope: Scope, board_id: Uuid) -> Result<Board> {
    let owner = resolve_owner(store, user_id, scope).await?;
    let board = boards::get_board_by_id(store, board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Board not found".to_string()))?;
    ensure_owned_by(&board, owner)?;
    Ok(board)
}

/// Renames a board
pub async fn update_board(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    board_id: Uuid,
    request: UpdateBoardRequest,
) -> Result<Board> {
    let mut board = get_board(store, user_id, scope, board_id).await?;

    board.name = validate_required_string(&request.name, "name")?;
    board.updated_at = Utc::now();
    boards::update_board(store, &board).await?;

    Ok(board)
}

/// Deletes a board and every task on it
///
/// The two deletes are not atomic. When the task cascade fails after the
/// board is gone, the caller gets `PartialFailure`; the orphan cleanup worker
/// later removes the stranded tasks.
pub async fn delete_board(
    store: &Store,
    user_id: Uuid,
    scope: Scope,
    board_id: Uuid,
) -> Result<BoardDeletion> {
    get_board(store, user_id, scope, board_id).await?;

    if !boards::delete_board(store, board_id).await? {
        return Err(Error::NotFound("Board not found".to_string()));
    }

    let tasks_deleted = tasks::delete_tasks_by_board(store, board_id)
        .await
        .map_err(|e| {
            tracing::error!(board_id = %board_id, error = %e, "Board deleted but task cascade failed");
            Error::PartialFailure("Board deleted but its tasks could not be removed".to_string())
        })?;

    Ok(BoardDeletion {
        board_id,
        tasks_deleted,
    })
}
