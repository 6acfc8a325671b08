//! User account handlers
//!
//! Registration, login and refresh answer with `{"token": <access token>}`.
//! Register and login also set the refresh token cookie.

use axum::{
    extract::{Extension, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};

use crate::{
    error::Result,
    handlers::{extract::Json, log_handler_error},
    middleware::auth::AuthenticatedUser,
    models::users::{AuthTokens, DeleteUserRequest, LoginUser, RegisterUser, UpdateProfileRequest},
    services::{
        cookies::{build_clear_refresh_token_cookie, build_refresh_token_cookie, extract_refresh_token},
        users,
    },
    state::AppState,
};

/// JSON body plus an optional Set-Cookie header
pub struct CookieResponse {
    json_body: serde_json::Value,
    cookie: Option<String>,
}

impl CookieResponse {
    fn token(state: &AppState, tokens: &AuthTokens) -> Self {
        let cookie = tokens.refresh_token.as_deref().map(|refresh| {
            build_refresh_token_cookie(
                refresh,
                state.config.jwt.refresh_token_expiration_seconds,
                &state.config.cookies,
            )
        });

        Self {
            json_body: serde_json::json!({ "token": tokens.access_token }),
            cookie,
        }
    }
}

impl IntoResponse for CookieResponse {
    fn into_response(self) -> Response {
        let mut response = Json(self.json_body).into_response();

        if let Some(cookie) = self.cookie {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }

        response
    }
}

// ============================================================================
// REGISTER / LOGIN / REFRESH / LOGOUT
// ============================================================================

/// POST /api/v1/users/create
///
/// Registers a new user and signs them in.
///
/// # Request Body
/// - `name`: Display name
/// - `email`: Email address (must be unique)
/// - `password`: At least 8 characters with upper, lower, digit and special
///
/// # HTTP Status Codes
/// - `200 OK`: `{"token": ...}`, refresh cookie set
/// - `400 BAD_REQUEST`: Validation error
/// - `409 CONFLICT`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUser>,
) -> Result<CookieResponse> {
    tracing::info!(operation = "register", "Registering user");

    let tokens = users::register_user(state.store.as_ref(), &state.config, request)
        .await
        .inspect_err(|e| log_handler_error("register", e))?;

    tracing::info!(operation = "register", user_id = %tokens.user_id, "User registered");
    Ok(CookieResponse::token(&state, &tokens))
}

/// POST /api/v1/users/login
///
/// # Request Body
/// - `email`: Email address
/// - `password`: Password
///
/// # HTTP Status Codes
/// - `200 OK`: `{"token": ...}`, refresh cookie set
/// - `403 FORBIDDEN`: Wrong password
/// - `404 NOT_FOUND`: No user with that email
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginUser>,
) -> Result<CookieResponse> {
    let tokens = users::login_user(state.store.as_ref(), &state.config, request)
        .await
        .inspect_err(|e| log_handler_error("login", e))?;

    tracing::info!(operation = "login", user_id = %tokens.user_id, "User logged in");
    Ok(CookieResponse::token(&state, &tokens))
}

/// GET /api/v1/users/refresh
///
/// Exchanges the refresh token cookie for a new access token.
///
/// # HTTP Status Codes
/// - `200 OK`: `{"token": ...}`
/// - `403 FORBIDDEN`: Cookie missing, expired, forged or not a refresh token
pub async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> Result<CookieResponse> {
    let cookie_header = headers.get(COOKIE).and_then(|h| h.to_str().ok());

    let refresh_token = extract_refresh_token(cookie_header, &state.config.cookies)
        .inspect_err(|e| log_handler_error("refresh", e))?;
    let tokens = users::refresh_access_token(state.store.as_ref(), &state.config, &refresh_token)
        .await
        .inspect_err(|e| log_handler_error("refresh", e))?;

    #[cfg(debug_assertions)]
    tracing::debug!(operation = "refresh", user_id = %tokens.user_id, "Access token refreshed");

    Ok(CookieResponse::token(&state, &tokens))
}

/// POST /api/v1/users/logout
///
/// Clears the refresh token cookie. Always succeeds.
pub async fn logout(State(state): State<AppState>) -> CookieResponse {
    CookieResponse {
        json_body: serde_json::json!({ "message": "Logged out" }),
        cookie: Some(build_clear_refresh_token_cookie(&state.config.cookies)),
    }
}

// ============================================================================
// PROFILE
// ============================================================================

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let profile = users::get_profile(state.store.as_ref(), auth_user.id)
        .await
        .inspect_err(|e| log_handler_error("get_me", e))?;

    Ok(Json(serde_json::json!({ "user": profile })))
}

/// PATCH /api/v1/users/me
///
/// # Request Body
/// - `name`: Optional new display name
/// - `avatar`: Optional avatar reference; an empty string clears it
///
/// # HTTP Status Codes
/// - `200 OK`: Updated profile
/// - `400 BAD_REQUEST`: Invalid name
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>> {
    let profile = users::update_profile(state.store.as_ref(), auth_user.id, request)
        .await
        .inspect_err(|e| log_handler_error("update_me", e))?;

    tracing::info!(operation = "update_me", user_id = %auth_user.id, "Profile updated");
    Ok(Json(serde_json::json!({ "user": profile })))
}

/// DELETE /api/v1/users/delete
///
/// Deletes the caller's account. The password must be confirmed.
///
/// # Request Body
/// - `password`: Current password
///
/// # HTTP Status Codes
/// - `200 OK`: Account deleted, refresh cookie cleared
/// - `403 FORBIDDEN`: Wrong password
/// - `409 CONFLICT`: Caller still owns workspaces
/// - `500 INTERNAL_SERVER_ERROR`: Account deleted but cleanup incomplete
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<DeleteUserRequest>,
) -> Result<CookieResponse> {
    tracing::info!(operation = "delete_me", user_id = %auth_user.id, "Deleting account");

    users::delete_user(state.store.as_ref(), &state.config, auth_user.id, request)
        .await
        .inspect_err(|e| log_handler_error("delete_me", e))?;

    tracing::info!(operation = "delete_me", user_id = %auth_user.id, "Account deleted");
    Ok(CookieResponse {
        json_body: serde_json::json!({ "message": "Account deleted" }),
        cookie: Some(build_clear_refresh_token_cookie(&state.config.cookies)),
    })
}
