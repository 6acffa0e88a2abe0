//! Handler for the `config` command group.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "config": config,
        }));
        return Ok(());
    }

    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::Other(format!("failed to render config: {e}")))?;
    output::section("Effective Configuration");
    output::field("Database", config.database_path().display());
    output::lines(&rendered);
    Ok(())
}

/// Execute `config validate`.
///
/// Loading already validated the file; this reports the result.
pub fn execute_validate(config: &Config) -> Result<()> {
    config.validate()?;
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
        }));
        return Ok(());
    }
    output::success("Configuration is valid");
    Ok(())
}
