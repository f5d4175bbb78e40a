//! Anonymization configuration

use crate::anonymization::verify::LeakPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Anonymization settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// What to do when a record still contains a declared name
    #[serde(default)]
    pub leak_policy: LeakPolicy,
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("STORYLOG_ANONYMIZATION_LEAK_POLICY") {
            self.leak_policy = val
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid STORYLOG_ANONYMIZATION_LEAK_POLICY value")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnonymizationConfig::default();
        assert_eq!(config.leak_policy, LeakPolicy::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_block_policy() {
        let config: AnonymizationConfig = toml::from_str(r#"leak_policy = "block""#).unwrap();
        assert_eq!(config.leak_policy, LeakPolicy::Block);
    }
}
