//! Access token authentication middleware
//!
//! Validates the `X-Authorization` header and makes the caller available to
//! handlers as an `AuthenticatedUser` request extension.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::users::User,
    queries,
    services::jwt::{authenticate_access_token, extract_token_from_header},
    state::AppState,
};

/// Header carrying the access token
pub const AUTH_HEADER: &str = "x-authorization";

/// Authenticated user extracted from the access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Access token middleware
///
/// # Behavior
/// 1. Reads the token from `X-Authorization` (`Bearer ` prefix optional)
/// 2. Validates signature, expiry and that it is an access token
/// 3. Loads the user; a token for a deleted account is rejected
/// 4. Adds `AuthenticatedUser` to request extensions
///
/// A missing, expired or forged token yields 403; a refresh or invite token
/// used as an access token yields 400.
///
/// ```ignore
/// Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         jwt_auth_middleware,
///     ))
/// ```
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get(AUTH_HEADER).and_then(|h| h.to_str().ok());
    let token = extract_token_from_header(auth_header)?;
    let user_id = authenticate_access_token(&token, state.config.jwt.secret.expose_secret())?;

    let user = queries::users::get_user_by_id(state.store.as_ref(), user_id)
        .await?
        .ok_or_else(|| Error::Unauthorized("User no longer exists".to_string()))?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(user));
    Ok(next.run(request).await)
}
