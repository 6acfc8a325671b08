use std::sync::Arc;

use rela::{
    Error,
    database::Collection,
    models::{
        boards::CreateBoardRequest,
        ownership::{Owner, Scope},
        tasks::CreateTaskRequest,
        users::DeleteUserRequest,
    },
    queries,
    services::{boards, reconcile, tasks, users},
};

use crate::common::{FailingStore, STRONG_PASSWORD, TestStore, test_config};

fn confirm(password: &str) -> DeleteUserRequest {
    DeleteUserRequest {
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_delete_user_requires_password() {
    let test_store = TestStore::new();
    let tokens = test_store.register("Alice").await;

    let result = users::delete_user(
        test_store.store(),
        &test_store.config,
        tokens.user_id,
        confirm("WrongPass123!"),
    )
    .await;

    assert!(matches!(result, Err(Error::Unauthorized(_))));
    assert!(queries::users::get_user_by_id(test_store.store(), tokens.user_id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_workspace_owner_cannot_delete_account() {
    let test_store = TestStore::new();
    let tokens = test_store.register("Owner").await;
    test_store.create_workspace(tokens.user_id).await;

    let result = users::delete_user(
        test_store.store(),
        &test_store.config,
        tokens.user_id,
        confirm(STRONG_PASSWORD),
    )
    .await;

    assert!(matches!(result, Err(Error::Conflict(_))));
}

#[tokio::test]
async fn test_delete_user_removes_personal_data_and_memberships() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let board = boards::create_board(
        test_store.store(),
        member.user_id,
        Scope::Personal,
        CreateBoardRequest {
            name: "Personal".to_string(),
        },
    )
    .await
    .unwrap();
    tasks::create_task(
        test_store.store(),
        member.user_id,
        Scope::Personal,
        CreateTaskRequest {
            name: "Mine".to_string(),
            description: None,
            board_id: board.id,
            deadline: None,
        },
    )
    .await
    .unwrap();

    users::delete_user(
        test_store.store(),
        &test_store.config,
        member.user_id,
        confirm(STRONG_PASSWORD),
    )
    .await
    .unwrap();

    let owner_ref = Owner::User(member.user_id);
    assert!(queries::users::get_user_by_id(test_store.store(), member.user_id)
        .await
        .unwrap()
        .is_none());
    assert!(queries::boards::list_boards_by_owner(test_store.store(), owner_ref)
        .await
        .unwrap()
        .is_empty());
    assert!(queries::tasks::list_tasks_by_owner(test_store.store(), owner_ref, None)
        .await
        .unwrap()
        .is_empty());

    let workspace = queries::workspaces::get_workspace_by_id(test_store.store(), workspace.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workspace.members, vec![owner.user_id]);
}

#[tokio::test]
async fn test_delete_user_clears_workspace_assignments() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    let workspace = test_store.join(&workspace, member.user_id).await;
    let task = test_store.assigned_task(&workspace, member.user_id).await;

    users::delete_user(
        test_store.store(),
        &test_store.config,
        member.user_id,
        confirm(STRONG_PASSWORD),
    )
    .await
    .unwrap();

    let task = queries::tasks::get_task_by_id(test_store.store(), task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.assigned_to, None);
    assert_eq!(task.owned_by, Owner::Workspace(workspace.id));
}

#[tokio::test]
async fn test_interrupted_cleanup_is_partial_failure_and_reconciled() {
    let store = Arc::new(FailingStore::new(Collection::Tasks));
    let config = test_config();

    let tokens = users::register_user(
        store.as_ref(),
        &config,
        rela::models::users::RegisterUser {
            name: "Alice".to_string(),
            email: crate::common::generate_test_email(),
            password: STRONG_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();
    let board = boards::create_board(
        store.as_ref(),
        tokens.user_id,
        Scope::Personal,
        CreateBoardRequest {
            name: "Personal".to_string(),
        },
    )
    .await
    .unwrap();
    tasks::create_task(
        store.as_ref(),
        tokens.user_id,
        Scope::Personal,
        CreateTaskRequest {
            name: "Stranded".to_string(),
            description: None,
            board_id: board.id,
            deadline: None,
        },
    )
    .await
    .unwrap();

    store.arm();
    let result = users::delete_user(store.as_ref(), &config, tokens.user_id, confirm(STRONG_PASSWORD)).await;
    assert!(matches!(result, Err(Error::PartialFailure(_))));
    assert!(queries::users::get_user_by_id(store.as_ref(), tokens.user_id)
        .await
        .unwrap()
        .is_none());

    store.disarm();
    let report = reconcile::remove_orphans(store.as_ref()).await.unwrap();
    assert_eq!(report.tasks_removed, 1);
    assert_eq!(report.boards_removed, 1);
    assert!(queries::tasks::list_tasks(store.as_ref()).await.unwrap().is_empty());
}
