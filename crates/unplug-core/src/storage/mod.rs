mod config;
mod prefs;
pub mod usage_db;

pub use config::{BackendConfig, Config, MonitorConfig};
pub use prefs::Preferences;
pub use usage_db::UsageDb;

use std::path::PathBuf;

/// Returns `~/.config/unplug[-dev]/` based on UNPLUG_ENV.
///
/// Set UNPLUG_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("UNPLUG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("unplug-dev")
    } else {
        base_dir.join("unplug")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
