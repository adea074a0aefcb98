//! Parsing and validation.

use crate::error::ConfigError;
use crate::types::ElabConfig;

/// Parses `vela.toml` text and validates it.
pub fn load_config_from_str(content: &str) -> Result<ElabConfig, ConfigError> {
    let config: ElabConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ElabConfig) -> Result<(), ConfigError> {
    let suffix = config.companion_suffix();
    if suffix.is_empty() {
        return Err(ConfigError::Invalid {
            field: "elaborate.companion_suffix",
            reason: "must not be empty".to_string(),
        });
    }
    if let Some(bad) = suffix.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(ConfigError::Invalid {
            field: "elaborate.companion_suffix",
            reason: format!("character `{bad}` cannot appear in a signal name"),
        });
    }
    Ok(())
}
