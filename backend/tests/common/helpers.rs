//! Shared test helper functions
//!
//! Config and data generators used by the service tests, plus HTTP helpers
//! that drive a running `TestApp`.

use std::time::{SystemTime, UNIX_EPOCH};

use rela::Config;

use crate::common::TestApp;

/// Password accepted by the strength rules
pub const STRONG_PASSWORD: &str = "SecurePass123!";

/// Default config with cheap Argon2 parameters and insecure cookies
///
/// The HTTP tests talk plain http, where a `Secure` cookie would never be
/// sent back by the client.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.security.argon2_memory_kib = 8;
    config.security.argon2_iterations = 1;
    config.security.argon2_parallelism = 1;
    config.cookies.secure = false;
    config.workers.orphan_cleanup_interval_seconds = 0;
    config
}

/// Generates a unique test email using nanosecond timestamp
///
/// # Example
/// ```no_run
/// let email = generate_test_email();
/// // Returns something like "test_1234567890123456789_42@example.com"
/// ```
pub fn generate_test_email() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let random: u32 = rand::random();
    format!("test_{}_{}@example.com", timestamp, random)
}

/// Generates a unique workspace name
pub fn generate_workspace_name(prefix: &str) -> String {
    format!("{} {}", prefix, nanoid::nanoid!(10))
}

/// Registers a user over HTTP and returns the access token
///
/// The refresh cookie lands in the app's cookie store.
pub async fn register_user(app: &TestApp, email: &str) -> String {
    let response = app
        .client
        .post(app.url("/api/v1/users/create"))
        .json(&serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": STRONG_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Creates a workspace and returns its id
pub async fn create_workspace(app: &TestApp, token: &str, name: &str) -> String {
    let response = app
        .client
        .post(app.url("/api/v1/workspaces/create"))
        .header("X-Authorization", token)
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["workspace"]["id"].as_str().unwrap().to_string()
}

/// Mints an invite token for a workspace the caller owns
pub async fn create_invite(app: &TestApp, token: &str, workspace_id: &str) -> String {
    let response = app
        .client
        .post(app.url(&format!("/api/v1/workspaces/{}/invite", workspace_id)))
        .header("X-Authorization", token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Redeems an invite token and returns the response status
pub async fn accept_invite(app: &TestApp, token: &str, invite: &str) -> reqwest::StatusCode {
    app.client
        .post(app.url(&format!("/api/v1/workspaces/invite/accept/{}", invite)))
        .header("X-Authorization", token)
        .send()
        .await
        .unwrap()
        .status()
}

/// Creates a board under `base` ("" for personal, "/workspaces/{id}" for shared)
pub async fn create_board(app: &TestApp, token: &str, base: &str, name: &str) -> String {
    let response = app
        .client
        .post(app.url(&format!("/api/v1{}/boards", base)))
        .header("X-Authorization", token)
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["board"]["id"].as_str().unwrap().to_string()
}

/// Creates a task on a board under `base` and returns its id
pub async fn create_task(app: &TestApp, token: &str, base: &str, board_id: &str, name: &str) -> String {
    let response = app
        .client
        .post(app.url(&format!("/api/v1{}/tasks", base)))
        .header("X-Authorization", token)
        .json(&serde_json::json!({ "name": name, "board": board_id }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["task"]["id"].as_str().unwrap().to_string()
}
