//! Config resolution and service wiring shared by CLI handlers.

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_service, open_database, SqliteService};
use crate::infrastructure::config::settings::Config;

use super::paths;

/// Resolve the effective configuration.
///
/// An explicit `--config` must exist. Without it, `~/.basketry/config.toml`
/// is used when present and defaults otherwise. `--db` wins over both the
/// file and `BASKETRY_DATABASE`.
///
/// # Errors
/// Returns an error if the chosen file cannot be read or is invalid.
pub fn load_config(config_path: Option<&Path>, db: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load(path)?,
        None => {
            let default = paths::default_config();
            if default.exists() {
                Config::load(&default)?
            } else {
                Config::from_env()
            }
        }
    };

    if let Some(db) = db {
        let db = db.to_str().ok_or_else(|| ConfigError::InvalidValue {
            field: "db",
            reason: "path is not valid UTF-8".to_string(),
        })?;
        config.database = db.to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Open the configured database and build the service.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_service(config: &Config) -> Result<SqliteService> {
    let pool = open_database(&config.database_path())?;
    build_service(config, pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(load_config(Some(missing.as_path()), None).is_err());
    }

    #[test]
    fn db_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = \"/srv/shop.db\"\n").unwrap();
        let db = dir.path().join("other.db");

        let config = load_config(Some(path.as_path()), Some(db.as_path())).unwrap();
        assert_eq!(config.database_path(), db);
    }
}
