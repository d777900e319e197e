use std::{
    fmt,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::media::MediaError;

/// Error types for the playbar crate.
///
/// Covers configuration loading and validation plus media source failures
/// that reach the command-line surface. Runtime playback hiccups never end
/// up here; the controller logs and absorbs them.
#[derive(Error, Debug)]
pub enum PlaybarError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in {component}: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Component containing the field
        component: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error with path context
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Media source error
    #[error("media source error: {0}")]
    Media(#[from] MediaError),
}

/// A specialized `Result` type for playbar operations.
pub type Result<T> = result::Result<T, PlaybarError>;

impl PlaybarError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        PlaybarError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path that could not be accessed.
    pub fn io_at(error: impl fmt::Display, path: &Path) -> Self {
        PlaybarError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
