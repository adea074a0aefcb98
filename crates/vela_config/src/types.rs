//! Configuration schema.

use serde::Deserialize;

/// Root of `vela.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElabConfig {
    /// Settings of the elaboration engine.
    pub elaborate: ElaborateSection,
}

/// The `[elaborate]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElaborateSection {
    /// Appended to an inout port name to form its output companion (`z` -> `z0`).
    pub companion_suffix: String,
    /// Drive outputs of 2-state types (`bit`, `int`, ...) that have no
    /// initializer with the type's implicit all-zero value.
    pub implicit_two_state_defaults: bool,
    /// Elaborate independent modules on a worker pool.
    pub parallel: bool,
    /// Worker count for parallel elaboration; `0` lets the pool decide.
    pub threads: usize,
}

impl Default for ElaborateSection {
    fn default() -> Self {
        Self {
            companion_suffix: "0".to_string(),
            implicit_two_state_defaults: true,
            parallel: true,
            threads: 0,
        }
    }
}

impl ElabConfig {
    /// Shorthand for `self.elaborate.companion_suffix`.
    pub fn companion_suffix(&self) -> &str {
        &self.elaborate.companion_suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixture_convention() {
        let cfg = ElabConfig::default();
        assert_eq!(cfg.companion_suffix(), "0");
        assert!(cfg.elaborate.implicit_two_state_defaults);
        assert!(cfg.elaborate.parallel);
        assert_eq!(cfg.elaborate.threads, 0);
    }
}
