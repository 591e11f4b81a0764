//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_pretty() -> bool {
    true
}

/// Entity assumed when a command is run without `--entity`.
fn default_entity() -> String {
    "annotation".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Pretty-print JSON output. `--compact` overrides this per invocation.
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Entity name used when `--entity` is omitted (e.g., "question", "asset").
    #[serde(default = "default_entity")]
    pub default_entity: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            default_entity: default_entity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.pretty);
        assert_eq!(config.default_entity, "annotation");
    }
}
