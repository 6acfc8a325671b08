use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use std::fmt;

use crate::services::cookies::CookieConfig;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub cookies: CookieConfig,
    #[serde(default)]
    pub workers: WorkersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which document store backs the service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub user: String,
    #[serde(skip_serializing, default = "default_database_password")]
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC signing secret. Override with RELA__JWT__SECRET in production.
    #[serde(skip_serializing, default = "default_jwt_secret")]
    pub secret: SecretString,
    pub access_token_expiration_seconds: i64,
    pub refresh_token_expiration_seconds: i64,
    pub invite_token_expiration_seconds: i64,
}

/// Password hashing parameters (Argon2id keyed with a server-side pepper).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing, default = "default_password_pepper")]
    pub password_pepper: SecretString,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkersConfig {
    /// Interval of the orphan cleanup worker; 0 disables it.
    pub orphan_cleanup_interval_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `RELA__` prefix and `__` separator
            // e.g., RELA__JWT__SECRET="..." or RELA__DATABASE__BACKEND="postgres"
            .add_source(
                config::Environment::with_prefix("RELA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Constructs the database connection string.
    pub fn connection_string(&self) -> SecretString {
        SecretString::from(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database
        ))
    }
}

fn default_database_password() -> SecretString {
    SecretString::from("password")
}

fn default_jwt_secret() -> SecretString {
    SecretString::from("change-me-in-production-this-is-not-a-secret")
}

fn default_password_pepper() -> SecretString {
    SecretString::from("change-me-pepper")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            user: "postgres".to_string(),
            password: default_database_password(),
            host: "localhost".to_string(),
            port: 5432,
            database: "rela".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            access_token_expiration_seconds: 300,
            refresh_token_expiration_seconds: 7 * 24 * 60 * 60,
            invite_token_expiration_seconds: 14 * 24 * 60 * 60,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_pepper: default_password_pepper(),
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            orphan_cleanup_interval_seconds: 300,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets are skipped by serde
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
