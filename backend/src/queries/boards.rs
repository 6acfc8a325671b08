use chrono::Utc;
use uuid::Uuid;

use super::{from_document, from_documents, to_document};
use crate::Store;
use crate::{
    database::{Collection, Filter},
    error::{Error, Result},
    models::{
        boards::{Board, NewBoard},
        ownership::Owner,
    },
};

pub async fn create_board(store: &Store, new_board: NewBoard) -> Result<Board> {
    let now = Utc::now();
    let board = Board {
        id: Uuid::now_v7(),
        name: new_board.name,
        owned_by: new_board.owned_by,
        created_at: now,
        updated_at: now,
    };

    store
        .insert(Collection::Boards, board.id, to_document(&board)?)
        .await?;

    Ok(board)
}

/// Gets a single board by its ID. The board may not exist.
pub async fn get_board_by_id(store: &Store, id: Uuid) -> Result<Option<Board>> {
    store
        .find_one(Collection::Boards, &Filter::by_id(id))
        .await?
        .map(from_document)
        .transpose()
}

pub async fn list_boards_by_owner(store: &Store, owner: Owner) -> Result<Vec<Board>> {
    from_documents(
        store
            .find(Collection::Boards, &Filter::all().eq("owned_by", owner))
            .await?,
    )
}

pub async fn list_boards(store: &Store) -> Result<Vec<Board>> {
    from_documents(store.find(Collection::Boards, &Filter::all()).await?)
}

pub async fn update_board(store: &Store, board: &Board) -> Result<()> {
    let replaced = store
        .replace(Collection::Boards, board.id, to_document(board)?)
        .await?;
    if !replaced {
        return Err(Error::NotFound("Board not found".to_string()));
    }
    Ok(())
}

/// Deletes a board by ID. Returns whether a board was removed.
pub async fn delete_board(store: &Store, id: Uuid) -> Result<bool> {
    Ok(store.delete(Collection::Boards, &Filter::by_id(id)).await? > 0)
}

/// Deletes every board belonging to `owner` and returns how many were removed.
pub async fn delete_boards_by_owner(store: &Store, owner: Owner) -> Result<u64> {
    store
        .delete(Collection::Boards, &Filter::all().eq("owned_by", owner))
        .await
}
