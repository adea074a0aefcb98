//! Elaboration settings read from the `[elaborate]` table of `vela.toml`.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::load_config_from_str;
pub use types::{ElabConfig, ElaborateSection};
