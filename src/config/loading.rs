use std::{fs, path::Path};

use tracing::debug;

use super::Config;
use crate::{PlaybarError, Result};

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read
    /// - The TOML content is invalid
    /// - The configuration fails validation
    pub fn load(path: &Path) -> Result<Config> {
        let config = Self::read(path)?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Reads a configuration file without validating it.
    ///
    /// For callers that layer overrides on top of the file before calling
    /// [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is invalid
    pub fn read(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| PlaybarError::io_at(e, path))?;
        toml::from_str(&content).map_err(|e| PlaybarError::toml_parse(e, Some(path)))
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| PlaybarError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `PlaybarError::InvalidConfigField` if `player.source` is
    /// missing or not a usable locator.
    pub fn validate(&self) -> Result<()> {
        if self.player.source.trim().is_empty() {
            return Err(PlaybarError::InvalidConfigField {
                field: "source".to_string(),
                component: "player".to_string(),
                reason: "a media source is required".to_string(),
            });
        }

        self.player
            .source_uri()
            .map_err(|e| PlaybarError::InvalidConfigField {
                field: "source".to_string(),
                component: "player".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns `PlaybarError::ConfigValidation` if serialization fails
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| PlaybarError::ConfigValidation {
            component: "config serialization".to_string(),
            details: e.to_string(),
        })
    }
}
