use crate::common::{
    TestApp, accept_invite, create_board, create_invite, create_task, create_workspace,
    generate_test_email, generate_workspace_name, register_user,
};

async fn me(app: &TestApp, token: &str) -> String {
    let response = app
        .client
        .get(app.url("/api/v1/users/me"))
        .header("X-Authorization", token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    body["user"]["id"].as_str().unwrap().to_string()
}

async fn post_target(app: &TestApp, token: &str, workspace_id: &str, action: &str, target: &str) -> reqwest::StatusCode {
    app.client
        .post(app.url(&format!("/api/v1/workspaces/{}/{}", workspace_id, action)))
        .header("X-Authorization", token)
        .json(&serde_json::json!({ "id": target }))
        .send()
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_invite_promote_kick_flow() {
    let app = TestApp::new().await;
    let alice = register_user(&app, &generate_test_email()).await;
    let workspace_id = create_workspace(&app, &alice, &generate_workspace_name("Flow")).await;
    let invite = create_invite(&app, &alice, &workspace_id).await;

    let bob = register_user(&app, &generate_test_email()).await;
    let bob_id = me(&app, &bob).await;
    assert_eq!(accept_invite(&app, &bob, &invite).await, 200);

    let response = app
        .client
        .get(app.url(&format!("/api/v1/workspaces/{}/members", workspace_id)))
        .header("X-Authorization", &alice)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let ids: Vec<&str> = body["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&bob_id.as_str()));

    assert_eq!(post_target(&app, &alice, &workspace_id, "promote", &bob_id).await, 200);

    let response = app
        .client
        .get(app.url(&format!("/api/v1/workspaces/{}", workspace_id)))
        .header("X-Authorization", &alice)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["workspace"]["owner_id"], bob_id);

    assert_eq!(post_target(&app, &alice, &workspace_id, "kick", &bob_id).await, 403);
}

#[tokio::test]
async fn test_accept_invite_twice_keeps_single_membership() {
    let app = TestApp::new().await;
    let owner = register_user(&app, &generate_test_email()).await;
    let workspace_id = create_workspace(&app, &owner, &generate_workspace_name("Twice")).await;
    let invite = create_invite(&app, &owner, &workspace_id).await;
    let guest = register_user(&app, &generate_test_email()).await;

    assert_eq!(accept_invite(&app, &guest, &invite).await, 200);
    assert_eq!(accept_invite(&app, &guest, &invite).await, 200);

    let response = app
        .client
        .get(app.url(&format!("/api/v1/workspaces/{}/members", workspace_id)))
        .header("X-Authorization", &owner)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_invalid_invite_token_returns_400() {
    let app = TestApp::new().await;
    let guest = register_user(&app, &generate_test_email()).await;

    assert_eq!(accept_invite(&app, &guest, "not-a-token").await, 400);
    // An access token is not an invite
    assert_eq!(accept_invite(&app, &guest, &guest).await, 400);
}

#[tokio::test]
async fn test_invite_is_owner_only() {
    let app = TestApp::new().await;
    let owner = register_user(&app, &generate_test_email()).await;
    let stranger = register_user(&app, &generate_test_email()).await;
    let workspace_id = create_workspace(&app, &owner, &generate_workspace_name("Closed")).await;

    let response = app
        .client
        .post(app.url(&format!("/api/v1/workspaces/{}/invite", workspace_id)))
        .header("X-Authorization", &stranger)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_kick_and_promote_status_codes() {
    let app = TestApp::new().await;
    let owner = register_user(&app, &generate_test_email()).await;
    let owner_id = me(&app, &owner).await;
    let outsider = register_user(&app, &generate_test_email()).await;
    let outsider_id = me(&app, &outsider).await;
    let workspace_id = create_workspace(&app, &owner, &generate_workspace_name("Codes")).await;

    assert_eq!(post_target(&app, &owner, &workspace_id, "kick", &owner_id).await, 400);
    assert_eq!(post_target(&app, &owner, &workspace_id, "kick", &outsider_id).await, 404);
    assert_eq!(post_target(&app, &owner, &workspace_id, "promote", &outsider_id).await, 400);
    assert_eq!(post_target(&app, &outsider, &workspace_id, "kick", &owner_id).await, 403);
}

#[tokio::test]
async fn test_leave_workspace() {
    let app = TestApp::new().await;
    let owner = register_user(&app, &generate_test_email()).await;
    let workspace_id = create_workspace(&app, &owner, &generate_workspace_name("Leave")).await;
    let invite = create_invite(&app, &owner, &workspace_id).await;
    let member = register_user(&app, &generate_test_email()).await;
    accept_invite(&app, &member, &invite).await;
    let url = app.url(&format!("/api/v1/workspaces/{}/leave", workspace_id));

    let owner_leave = app.client.post(&url).header("X-Authorization", &owner).send().await.unwrap();
    assert_eq!(owner_leave.status(), 400);

    let member_leave = app.client.post(&url).header("X-Authorization", &member).send().await.unwrap();
    assert_eq!(member_leave.status(), 200);

    let after = app
        .client
        .get(app.url(&format!("/api/v1/workspaces/{}", workspace_id)))
        .header("X-Authorization", &member)
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), 403);
}

#[tokio::test]
async fn test_assign_task() {
    let app = TestApp::new().await;
    let owner = register_user(&app, &generate_test_email()).await;
    let workspace_id = create_workspace(&app, &owner, &generate_workspace_name("Assign")).await;
    let invite = create_invite(&app, &owner, &workspace_id).await;
    let member = register_user(&app, &generate_test_email()).await;
    let member_id = me(&app, &member).await;
    let owner_id = me(&app, &owner).await;
    accept_invite(&app, &member, &invite).await;

    let base = format!("/workspaces/{}", workspace_id);
    let board_id = create_board(&app, &owner, &base, "Shared").await;
    let task_id = create_task(&app, &owner, &base, &board_id, "Assign me").await;
    let url = app.url(&format!("/api/v1/workspaces/{}/assign", workspace_id));

    let response = app
        .client
        .post(&url)
        .header("X-Authorization", &member)
        .json(&serde_json::json!({ "taskId": task_id, "userId": owner_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    let response = app
        .client
        .post(&url)
        .header("X-Authorization", &member)
        .json(&serde_json::json!({ "task_id": task_id, "user_id": member_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["task"]["assigned_to"], member_id);
}
