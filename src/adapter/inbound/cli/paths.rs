//! Path utilities for basketry.
//!
//! All data lives under `~/.basketry/`:
//! - `~/.basketry/config.toml` - main configuration
//! - `~/.basketry/basketry.db` - default database

use std::path::PathBuf;

/// Returns the basketry home directory (`~/.basketry/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".basketry")
}

/// Returns the default config file path (`~/.basketry/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
