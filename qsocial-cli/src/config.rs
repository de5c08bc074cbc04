//! Startup configuration: `.env` files, then [`AppConfig`] resolution

use std::path::Path;

use anyhow::{Context, Result};
use qsocial_core::AppConfig;
use tracing::debug;

/// Load `.env` from the current directory, then `~/.qsocial/.env`.
///
/// Variables already set in the process win; dotenvy never overwrites them.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".qsocial").join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(_) => debug!("Loaded .env from ~/.qsocial: {}", env_file.display()),
                Err(e) => debug!("Failed to load ~/.qsocial/.env: {}", e),
            }
        }
    }
}

/// Defaults, then the config file, then the environment.
pub fn resolve(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}
