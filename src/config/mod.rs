//! Configuration schema definitions and validation.
//!
//! Defines the configuration structure for playbar: general settings and
//! the player's mount options. All configurations are serializable to/from
//! TOML format.

mod general;
mod loading;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for playbar.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. Everything except `player.source` has a default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player mount options.
    #[serde(default)]
    pub player: PlayerConfig,
}
