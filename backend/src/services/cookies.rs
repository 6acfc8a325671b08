use crate::error::{Error, Result};

/// Default name of the refresh token cookie
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Cookie security configuration
///
/// Controls how the refresh token cookie is issued to browser clients.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CookieConfig {
    /// Name of the refresh token cookie (default: "refreshToken")
    pub refresh_token_name: String,
    /// Secure flag ensures HTTPS-only transmission
    pub secure: bool,
    /// SameSite attribute for CSRF protection
    pub same_site: SameSite,
    /// Path attribute to limit cookie scope
    pub path: String,
}

/// SameSite cookie attribute for CSRF protection
#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_attribute(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            refresh_token_name: REFRESH_TOKEN_COOKIE.to_string(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

/// Builds a Set-Cookie header value for the refresh token
///
/// The cookie is always HttpOnly; `Secure` follows the configuration.
///
/// # Example
/// ```rust,no_run
/// use rela::services::cookies::{build_refresh_token_cookie, CookieConfig};
///
/// let cookie = build_refresh_token_cookie("my_refresh_token", 604800, &CookieConfig::default());
/// // "refreshToken=my_refresh_token; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=604800"
/// ```
pub fn build_refresh_token_cookie(token: &str, max_age_seconds: i64, config: &CookieConfig) -> String {
    format!(
        "{}={}; HttpOnly{}; SameSite={}; Path={}; Max-Age={}",
        config.refresh_token_name,
        token,
        if config.secure { "; Secure" } else { "" },
        config.same_site.as_attribute(),
        config.path,
        max_age_seconds
    )
}

/// Builds a Set-Cookie header value that clears the refresh token (Max-Age=0)
pub fn build_clear_refresh_token_cookie(config: &CookieConfig) -> String {
    format!(
        "{}=; HttpOnly{}; SameSite={}; Path={}; Max-Age=0",
        config.refresh_token_name,
        if config.secure { "; Secure" } else { "" },
        config.same_site.as_attribute(),
        config.path
    )
}

/// Extract a specific cookie value from a Cookie header
pub fn extract_cookie_value(cookie_header: &str, cookie_name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

/// Extracts the refresh token from the Cookie header
///
/// A missing header, a missing cookie and an empty value are all `Unauthorized`.
pub fn extract_refresh_token(cookie_header: Option<&str>, config: &CookieConfig) -> Result<String> {
    cookie_header
        .and_then(|header| extract_cookie_value(header, &config.refresh_token_name))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Unauthorized("Missing refresh token".to_string()))
}
