//! Configuration errors.

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The text is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A value parsed but is not acceptable.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted key path, e.g. `elaborate.companion_suffix`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
