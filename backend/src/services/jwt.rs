use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Kind of token, carried in the `type` claim
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenType {
    /// Short-lived bearer token for API calls
    Access,
    /// Long-lived token, only exchangeable for a new access token
    Refresh,
    /// Workspace invitation; the subject is the workspace id
    Invite,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id, or workspace id for invite tokens
    pub sub: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    pub fn subject_id(&self) -> std::result::Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Malformed token")]
    Malformed,
    #[error("Expected {expected} token, got {actual}")]
    WrongType { expected: TokenType, actual: TokenType },
}

/// Issues a signed token for `subject` that expires after `lifetime`
///
/// # Example
/// ```rust,no_run
/// use rela::services::jwt::{generate_token, TokenType};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// let token = generate_token(Uuid::now_v7(), TokenType::Access, "my-secret", Duration::minutes(5))?;
/// # Ok::<(), rela::error::Error>(())
/// ```
pub fn generate_token(
    subject: Uuid,
    token_type: TokenType,
    secret: &str,
    lifetime: Duration,
) -> Result<String> {
    let now = Utc::now();
    let expiration = now + lifetime;

    let claims = Claims {
        sub: subject.to_string(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
        token_type,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate {} token: {}", token_type, e)))
}

/// Verifies signature, then expiry, then the `type` claim
pub fn verify_token(
    token: &str,
    secret: &str,
    expected: TokenType,
) -> std::result::Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let claims = token_data.claims;
    if claims.token_type != expected {
        return Err(TokenError::WrongType {
            expected,
            actual: claims.token_type,
        });
    }

    Ok(claims)
}

/// Validates an access token and returns the user id it was issued to
///
/// A refresh or invite token presented here is a malformed request (400);
/// anything else wrong with the token is `Unauthorized`.
pub fn authenticate_access_token(token: &str, secret: &str) -> Result<Uuid> {
    verify_token(token, secret, TokenType::Access)
        .and_then(|claims| claims.subject_id())
        .map_err(|e| match e {
            TokenError::WrongType { .. } => Error::validation("token", e.to_string()),
            other => Error::Unauthorized(other.to_string()),
        })
}

/// Validates a refresh token; every failure is `Unauthorized`
pub fn verify_refresh_token(token: &str, secret: &str) -> Result<Uuid> {
    verify_token(token, secret, TokenType::Refresh)
        .and_then(|claims| claims.subject_id())
        .map_err(|e| Error::Unauthorized(e.to_string()))
}

/// Validates an invite token and returns the workspace id it grants access to
pub fn verify_invite_token(token: &str, secret: &str) -> Result<Uuid> {
    verify_token(token, secret, TokenType::Invite)
        .and_then(|claims| claims.subject_id())
        .map_err(|e| Error::validation("token", format!("Invalid invite token: {}", e)))
}

/// Extracts the token from the `X-Authorization` header
///
/// Accepts either the raw token or `Bearer <token>`.
pub fn extract_token_from_header(auth_header: Option<&str>) -> Result<String> {
    let header = auth_header
        .ok_or_else(|| Error::Unauthorized("Missing X-Authorization header".to_string()))?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(Error::Unauthorized("Empty token".to_string()));
    }

    Ok(token.to_string())
}
