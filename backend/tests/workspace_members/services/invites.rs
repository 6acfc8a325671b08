use chrono::Duration;
use rela::{
    Error,
    services::{
        jwt::{self, TokenType},
        workspace_members::{accept_invite, create_invite},
    },
};
use secrecy::ExposeSecret;
use tokio_test::assert_ok;
use uuid::Uuid;

use crate::common::TestStore;

#[tokio::test]
async fn test_invite_is_owner_only() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let member = test_store.register("Member").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    test_store.join(&workspace, member.user_id).await;

    let result = create_invite(test_store.store(), &test_store.config.jwt, workspace.id, member.user_id).await;
    assert!(matches!(result, Err(Error::Forbidden(_))));

    let invite = assert_ok!(
        create_invite(test_store.store(), &test_store.config.jwt, workspace.id, owner.user_id).await
    );
    assert_eq!(invite.workspace_id, workspace.id);
    let claims = jwt::verify_token(
        &invite.token,
        test_store.config.jwt.secret.expose_secret(),
        TokenType::Invite,
    )
    .unwrap();
    assert_eq!(claims.sub, workspace.id.to_string());
    assert_eq!(claims.exp - claims.iat, test_store.config.jwt.invite_token_expiration_seconds);
}

#[tokio::test]
async fn test_accept_invite_is_idempotent() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let guest = test_store.register("Guest").await;
    let workspace = test_store.create_workspace(owner.user_id).await;
    let invite = assert_ok!(
        create_invite(test_store.store(), &test_store.config.jwt, workspace.id, owner.user_id).await
    );

    for _ in 0..2 {
        accept_invite(test_store.store(), &test_store.config.jwt, &invite.token, guest.user_id)
            .await
            .unwrap();
    }

    let joined = accept_invite(test_store.store(), &test_store.config.jwt, &invite.token, owner.user_id)
        .await
        .unwrap();
    assert_eq!(joined.members, vec![owner.user_id, guest.user_id]);
}

#[tokio::test]
async fn test_accept_rejects_non_invite_tokens() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let guest = test_store.register("Guest").await;
    test_store.create_workspace(owner.user_id).await;

    for token in [owner.access_token.clone(), owner.refresh_token.clone().unwrap(), "garbage".to_string()] {
        let result = accept_invite(test_store.store(), &test_store.config.jwt, &token, guest.user_id).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}

#[tokio::test]
async fn test_accept_rejects_expired_invite() {
    let test_store = TestStore::new();
    let owner = test_store.register("Owner").await;
    let guest = test_store.register("Guest").await;
    let workspace = test_store.create_workspace(owner.user_id).await;

    let expired = jwt::generate_token(
        workspace.id,
        TokenType::Invite,
        test_store.config.jwt.secret.expose_secret(),
        Duration::seconds(-60),
    )
    .unwrap();

    let result = accept_invite(test_store.store(), &test_store.config.jwt, &expired, guest.user_id).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_invite_for_deleted_workspace_is_not_found() {
    let test_store = TestStore::new();
    let guest = test_store.register("Guest").await;

    let token = jwt::generate_token(
        Uuid::now_v7(),
        TokenType::Invite,
        test_store.config.jwt.secret.expose_secret(),
        Duration::days(1),
    )
    .unwrap();

    let result = accept_invite(test_store.store(), &test_store.config.jwt, &token, guest.user_id).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}
