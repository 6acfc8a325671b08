use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::Store;
use crate::{
    config::{Config, JwtConfig, SecurityConfig},
    error::{Error, Result},
    models::{
        ownership::Owner,
        users::{
            AuthTokens, DeleteUserRequest, LoginUser, NewUser, RegisterUser, UpdateProfileRequest,
            UserProfile,
        },
    },
    queries::{boards, tasks, users, workspaces},
    services::jwt::{self, TokenType},
    validation::{normalize_email, validate_display_name, validate_email, validate_password},
};

/// Builds the Argon2id hasher keyed with the server-side pepper.
fn argon2(security: &SecurityConfig) -> Result<Argon2<'_>> {
    let params = Params::new(
        security.argon2_memory_kib,
        security.argon2_iterations,
        security.argon2_parallelism,
        None,
    )
    .map_err(|e| Error::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

    Argon2::new_with_secret(
        security.password_pepper.expose_secret().as_bytes(),
        Algorithm::Argon2id,
        Version::V0x13,
        params,
    )
    .map_err(|e| Error::Internal(format!("Failed to initialize Argon2: {}", e)))
}

/// Hashes a password with a fresh random salt and returns the PHC string
pub fn hash_password(password: &str, security: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2(security)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string
pub fn verify_password(password: &str, hash: &str, security: &SecurityConfig) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    match argon2(security)?.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!("Password verification failed: {}", e))),
    }
}

/// Mints a short-lived access token for `user_id`
pub fn issue_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String> {
    jwt::generate_token(
        user_id,
        TokenType::Access,
        jwt_config.secret.expose_secret(),
        Duration::seconds(jwt_config.access_token_expiration_seconds),
    )
}

/// Mints an access token plus a refresh token for `user_id`
pub fn issue_tokens(user_id: Uuid, jwt_config: &JwtConfig) -> Result<AuthTokens> {
    let refresh_token = jwt::generate_token(
        user_id,
        TokenType::Refresh,
        jwt_config.secret.expose_secret(),
        Duration::seconds(jwt_config.refresh_token_expiration_seconds),
    )?;

    Ok(AuthTokens {
        user_id,
        access_token: issue_access_token(user_id, jwt_config)?,
        refresh_token: Some(refresh_token),
    })
}

/// Registers a new user and signs them in
pub async fn register_user(store: &Store, config: &Config, request: RegisterUser) -> Result<AuthTokens> {
    let name = validate_display_name(&request.name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let email = normalize_email(&request.email);
    if users::get_user_by_email(store, &email).await?.is_some() {
        return Err(Error::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password(&request.password, &config.security)?;

    // The store re-checks uniqueness atomically, so a concurrent registration
    // with the same email still ends in Conflict.
    let user = users::create_user(
        store,
        NewUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;

    issue_tokens(user.id, &config.jwt)
}

/// Authenticates a user by email and password
pub async fn login_user(store: &Store, config: &Config, request: LoginUser) -> Result<AuthTokens> {
    let email = normalize_email(&request.email);
    let user = users::get_user_by_email(store, &email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !verify_password(&request.password, &user.password_hash, &config.security)? {
        return Err(Error::Unauthorized("Invalid password".to_string()));
    }

    issue_tokens(user.id, &config.jwt)
}

/// Exchanges a refresh token for a new access token
///
/// The refresh token itself is not rotated.
pub async fn refresh_access_token(store: &Store, config: &Config, refresh_token: &str) -> Result<AuthTokens> {
    let user_id = jwt::verify_refresh_token(refresh_token, config.jwt.secret.expose_secret())?;

    if users::get_user_by_id(store, user_id).await?.is_none() {
        return Err(Error::Unauthorized("User no longer exists".to_string()));
    }

    Ok(AuthTokens {
        user_id,
        access_token: issue_access_token(user_id, &config.jwt)?,
        refresh_token: None,
    })
}

pub async fn get_profile(store: &Store, user_id: Uuid) -> Result<UserProfile> {
    let user = users::get_user_by_id(store, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
    Ok(UserProfile::from(&user))
}

/// Updates the display name and/or avatar reference
pub async fn update_profile(
    store: &Store,
    user_id: Uuid,
    request: UpdateProfileRequest,
) -> Result<UserProfile> {
    let mut user = users::get_user_by_id(store, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if let Some(name) = request.name {
        user.name = validate_display_name(&name)?;
    }
    if let Some(avatar) = request.avatar {
        let avatar = avatar.trim();
        user.avatar = (!avatar.is_empty()).then(|| avatar.to_string());
    }
    user.updated_at = Utc::now();

    users::update_user(store, &user).await?;
    Ok(UserProfile::from(&user))
}

/// Deletes the caller's account after re-checking their password
///
/// Owners must hand over or delete their workspaces first. After the user
/// record is gone, personal boards and tasks are removed, the user is
/// unassigned from workspace tasks and dropped from every member list. If
/// that cleanup fails the error is surfaced as a partial failure and the
/// orphan cleanup worker finishes it.
pub async fn delete_user(
    store: &Store,
    config: &Config,
    user_id: Uuid,
    request: DeleteUserRequest,
) -> Result<()> {
    let user = users::get_user_by_id(store, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if !verify_password(&request.password, &user.password_hash, &config.security)? {
        return Err(Error::Unauthorized("Invalid password".to_string()));
    }

    let owned = workspaces::list_workspaces_owned_by(store, user_id).await?;
    if !owned.is_empty() {
        return Err(Error::Conflict(format!(
            "User still owns {} workspace(s); transfer ownership or delete them first",
            owned.len()
        )));
    }

    if !users::delete_user(store, user_id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }

    remove_user_data(store, user_id).await.map_err(|e| {
        tracing::error!(user_id = %user_id, error = %e, "User deleted but cleanup failed");
        Error::PartialFailure("User deleted but some of their data could not be removed".to_string())
    })
}

async fn remove_user_data(store: &Store, user_id: Uuid) -> Result<()> {
    let owner = Owner::User(user_id);
    tasks::delete_tasks_by_owner(store, owner).await?;
    boards::delete_boards_by_owner(store, owner).await?;
    tasks::clear_assignee(store, user_id, None).await?;

    for mut workspace in workspaces::list_workspaces_for_member(store, user_id).await? {
        workspace.members.retain(|member| *member != user_id);
        workspace.updated_at = Utc::now();
        workspaces::update_workspace(store, &workspace).await?;
    }

    Ok(())
}
