//! Loading and validating `HealixConfig` from TOML.

use std::path::Path;

use tracing::debug;

use healix_contracts::error::{HealixError, HealixResult};

use crate::schema::HealixConfig;

impl HealixConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `HealixError::Config` if the TOML is malformed, does not match
    /// the schema, or fails validation.
    pub fn from_toml_str(s: &str) -> HealixResult<Self> {
        let config: HealixConfig = toml::from_str(s).map_err(|e| HealixError::Config {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            providers = config.providers.len(),
            emergency_number = %config.emergency.number,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> HealixResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| HealixError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> HealixResult<()> {
        for (i, provider) in self.providers.iter().enumerate() {
            let missing = [
                ("name", &provider.name),
                ("base_url", &provider.base_url),
                ("model", &provider.model),
                ("api_key_env", &provider.api_key_env),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((field, _)) = missing {
                return Err(HealixError::Config {
                    reason: format!("provider #{} has an empty '{}'", i + 1, field),
                });
            }
            if provider.timeout_secs == 0 {
                return Err(HealixError::Config {
                    reason: format!("provider '{}' has a zero timeout", provider.name),
                });
            }
        }

        if self.emergency.number.trim().is_empty() {
            return Err(HealixError::Config {
                reason: "emergency number must not be empty".to_string(),
            });
        }
        if self.reveal.chars_per_frame == 0 {
            return Err(HealixError::Config {
                reason: "reveal.chars_per_frame must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
