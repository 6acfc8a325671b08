pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
pub mod workers;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;

/// Store handle accepted by queries and services
pub type Store = dyn database::DocumentStore;

/// Load configuration from defaults, `.env` and `RELA__*` environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
