//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with an environment override for
//! the database location (`BASKETRY_DATABASE`).
//!
//! # Example
//!
//! ```no_run
//! use basketry::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::engine::{engine_settings, BasketsConfig, InsightsConfig, QueryConfig};
use super::logging::LoggingConfig;
use super::recompute::{ClusteringConfig, RulesConfig};
use super::schedule::ScheduleConfig;
use crate::application::recommend::EngineSettings;
use crate::error::{ConfigError, Result};

/// Environment variable that overrides [`Config::database`].
pub const DATABASE_ENV: &str = "BASKETRY_DATABASE";

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`] or
/// parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database. A leading `~/` expands to the home
    /// directory. Defaults to `~/.basketry/basketry.db`.
    #[serde(default = "default_database_path")]
    pub database: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub baskets: BasketsConfig,

    /// Association-rule recompute defaults.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Clustering recompute defaults, also used by the scheduler.
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Dashboard insight thresholds.
    #[serde(default)]
    pub insights: InsightsConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub query: QueryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            baskets: BasketsConfig::default(),
            rules: RulesConfig::default(),
            clustering: ClusteringConfig::default(),
            insights: InsightsConfig::default(),
            schedule: ScheduleConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

fn default_database_path() -> String {
    "~/.basketry/basketry.db".to_string()
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `BASKETRY_DATABASE` override, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Defaults plus environment overrides, for running without a file.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        if self.baskets.window_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "baskets.window_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        positive("rules.top_per_product", self.rules.top_per_product)?;
        positive("rules.max_antecedents", self.rules.max_antecedents)?;

        positive("clustering.top_features", self.clustering.top_features)?;
        positive("clustering.k", self.clustering.k)?;
        positive("clustering.max_iter", self.clustering.max_iter)?;
        positive("clustering.top_per_product", self.clustering.top_per_product)?;

        positive("insights.top_per_product", self.insights.top_per_product)?;
        positive("insights.max_antecedents", self.insights.max_antecedents)?;
        if !(0.0..=100.0).contains(&self.insights.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "insights.min_confidence",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if !self.insights.min_lift.is_finite() || self.insights.min_lift < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "insights.min_lift",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        if self.schedule.interval_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "schedule.interval_hours",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        positive("query.limit", self.query.limit)?;
        Ok(())
    }

    /// Database location with `~/` expanded.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        expand_home(&self.database)
    }

    /// Service settings derived from the basket, query and insight sections.
    ///
    /// # Errors
    /// Returns an error if the basket window is not positive.
    pub fn engine_settings(&self) -> Result<EngineSettings> {
        engine_settings(&self.baskets, &self.query, &self.insights)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn positive(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
