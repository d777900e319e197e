use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::media::{MediaError, SourceUri};

/// Player mount options.
///
/// `source` is the only required field. `title` and `poster` are display
/// metadata and never influence playback state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Locator of the media to play.
    pub source: String,

    /// Start playing as soon as the source is bound.
    pub auto_play: bool,

    /// Start with audio muted.
    pub muted: bool,

    /// Title shown above the transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Image shown before playback starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl PlayerConfig {
    /// Options for `source` with every other field at its default.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// The parsed source locator.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InvalidUri` if `source` is empty or malformed.
    pub fn source_uri(&self) -> Result<SourceUri, MediaError> {
        SourceUri::parse(&self.source)
    }
}
