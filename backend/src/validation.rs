//! Input validation utilities for the service layer.
//!
//! Every validator returns `Error::Validation` with the offending field name so
//! handlers can surface field-level messages to clients.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email regex is valid")
});

/// Normalizes an email address for storage and lookup (trimmed, lower-cased).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates email format
///
/// The address is normalized first, so `User@Example.COM` is accepted.
///
/// # Examples
/// ```
/// use rela::validation::validate_email;
///
/// validate_email("user@example.com").unwrap();
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    let email = normalize_email(email);

    if email.is_empty() {
        return Err(Error::validation("email", "Email cannot be empty"));
    }

    if email.len() > 254 {
        return Err(Error::validation(
            "email",
            "Email address is too long (max 254 characters)",
        ));
    }

    if email.contains("..") || !EMAIL_RE.is_match(&email) {
        return Err(Error::validation("email", "Invalid email format"));
    }

    Ok(())
}

/// Validates password strength
///
/// A password needs at least 8 characters and must mix upper-case,
/// lower-case, digit and special characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 8 {
        return Err(Error::validation(
            "password",
            "Password must be at least 8 characters long",
        ));
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !(has_upper && has_lower && has_digit && has_special) {
        return Err(Error::validation(
            "password",
            "Password must contain upper-case, lower-case, digit and special characters",
        ));
    }

    Ok(())
}

/// Validates workspace name format and constraints
pub fn validate_workspace_name(name: &str) -> Result<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::validation("name", "Workspace name cannot be empty"));
    }

    if name.chars().count() > 100 {
        return Err(Error::validation(
            "name",
            "Workspace name must be less than 100 characters",
        ));
    }

    if name.chars().any(char::is_control) {
        return Err(Error::validation(
            "name",
            "Workspace name cannot contain control characters",
        ));
    }

    Ok(())
}

/// Validates a user's display name and returns it trimmed.
pub fn validate_display_name(name: &str) -> Result<String> {
    let name = validate_required_string(name, "name")?;

    if name.chars().count() > 100 {
        return Err(Error::validation("name", "Name must be less than 100 characters"));
    }

    if name.chars().any(char::is_control) {
        return Err(Error::validation("name", "Name cannot contain control characters"));
    }

    Ok(name)
}

/// Validates that a string is not empty after trimming
///
/// # Returns
/// * `Ok(String)` with the trimmed string
/// * `Err(Error)` if empty after trimming
pub fn validate_required_string(input: &str, field_name: &str) -> Result<String> {
    let sanitized = input.trim().to_string();

    if sanitized.is_empty() {
        return Err(Error::validation(
            field_name,
            format!("{} cannot be empty", field_name),
        ));
    }

    Ok(sanitized)
}

/// Rejects deadlines that are not strictly in the future.
pub fn validate_deadline(deadline: DateTime<Utc>) -> Result<()> {
    if deadline <= Utc::now() {
        return Err(Error::validation("deadline", "Deadline must be in the future"));
    }
    Ok(())
}
