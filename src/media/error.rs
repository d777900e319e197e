/// Errors that can occur when talking to a media source
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// Source locator is empty or malformed
    #[error("Invalid media source URI: {0:?}")]
    InvalidUri(String),

    /// The source refused or failed to carry out a command
    #[error("Media command '{command}' failed: {details}")]
    CommandFailed {
        /// Name of the command that failed
        command: &'static str,
        /// Failure details reported by the source
        details: String,
    },

    /// The source has been shut down and no longer accepts commands
    #[error("Media source is closed")]
    SourceClosed,
}
