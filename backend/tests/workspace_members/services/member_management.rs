use rela::{
    Error, queries,
    services::workspace_members::{kick_member, leave_workspace, list_members, promote_member},
};
use uuid::Uuid;

use crate::common::TestStore;

#[tokio::test]
async fn test_list_members_returns_profiles() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let stranger = test_store.register("Stranger").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let members = list_members(test_store.store(), workspace.id, member.user_id)
        .await
        .unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Owner", "Member"]);

    let result = list_members(test_store.store(), workspace.id, stranger.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));
}

#[tokio::test]
async fn test_kick_member() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let updated = kick_member(test_store.store(), workspace.id, owner.user_id, member.user_id)
        .await
        .unwrap();

    assert_eq!(updated.members, vec![owner.user_id]);
    assert!(updated.is_member(owner.user_id));
}

#[tokio::test]
async fn test_kick_owner_always_fails() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let by_owner = kick_member(test_store.store(), workspace.id, owner.user_id, owner.user_id).await;
    assert!(matches!(by_owner, Err(Error::Validation(_))));

    let by_member = kick_member(test_store.store(), workspace.id, member.user_id, owner.user_id).await;
    assert!(matches!(by_member, Err(Error::Forbidden(_))));
}

#[tokio::test]
async fn test_kick_requires_owner_and_member_target() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let other = test_store.register("Other").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;
    test_store.join(&workspace, other.user_id).await;

    let result = kick_member(test_store.store(), workspace.id, member.user_id, other.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));

    let result = kick_member(test_store.store(), workspace.id, owner.user_id, Uuid::now_v7()).await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    let result = kick_member(test_store.store(), Uuid::now_v7(), owner.user_id, member.user_id).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_promote_transfers_ownership() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let promoted = promote_member(test_store.store(), workspace.id, owner.user_id, member.user_id)
        .await
        .unwrap();

    assert_eq!(promoted.owner_id, member.user_id);
    assert!(promoted.members.contains(&member.user_id), "New owner must be a member");
    assert!(promoted.members.contains(&owner.user_id), "Previous owner stays a member");

    // The previous owner lost owner rights
    let result = kick_member(test_store.store(), workspace.id, owner.user_id, member.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));
}

#[tokio::test]
async fn test_promote_non_member_fails() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let outsider = test_store.register("Outsider").await;
    let workspace = test_store.create_workspace(owner.user_id).await;

    let result = promote_member(test_store.store(), workspace.id, owner.user_id, outsider.user_id).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = promote_member(test_store.store(), workspace.id, owner.user_id, owner.user_id).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_promote_requires_owner() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let result = promote_member(test_store.store(), workspace.id, member.user_id, member.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));
}

#[tokio::test]
async fn test_leave_workspace() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let stranger = test_store.register("Stranger").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let result = leave_workspace(test_store.store(), workspace.id, owner.user_id).await;
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = leave_workspace(test_store.store(), workspace.id, stranger.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));

    leave_workspace(test_store.store(), workspace.id, member.user_id)
        .await
        .unwrap();
    let members = list_members(test_store.store(), workspace.id, owner.user_id)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, owner.user_id);
}

#[tokio::test]
async fn test_invite_promote_kick_flow() {
    let test_store = TestStore::new();
    let alice = test_store.register("Alice").await;
    let bob = test_store.register("Bob").await;
    let workspace = test_store.create_workspace(alice.user_id).await;

    test_store.join(&workspace, bob.user_id).await;
    let members = list_members(test_store.store(), workspace.id, alice.user_id)
        .await
        .unwrap();
    assert!(members.iter().any(|m| m.id == bob.user_id));

    let promoted = promote_member(test_store.store(), workspace.id, alice.user_id, bob.user_id)
        .await
        .unwrap();
    assert_eq!(promoted.owner_id, bob.user_id);

    let result = kick_member(test_store.store(), workspace.id, alice.user_id, bob.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));
}

#[tokio::test]
async fn test_kicked_member_loses_task_assignments() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    let workspace = test_store.join(&workspace, member.user_id).await;
    let task = test_store.assigned_task(&workspace, member.user_id).await;
    assert_eq!(task.assigned_to, Some(member.user_id));

    kick_member(test_store.store(), workspace.id, owner.user_id, member.user_id)
        .await
        .unwrap();

    let task = queries::tasks::get_task_by_id(test_store.store(), task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.assigned_to, None);
}

#[tokio::test]
async fn test_leaving_member_loses_task_assignments() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    let workspace = test_store.join(&workspace, member.user_id).await;
    let task = test_store.assigned_task(&workspace, member.user_id).await;

    leave_workspace(test_store.store(), workspace.id, member.user_id)
        .await
        .unwrap();

    let task = queries::tasks::get_task_by_id(test_store.store(), task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.assigned_to, None);
}
