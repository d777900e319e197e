use std::fmt;

use futures::stream::BoxStream;

use super::MediaError;

/// Locator of a playable resource.
///
/// Accepts any non-empty string without whitespace. The scheme is not
/// interpreted; relative paths such as `/video/intro.mp4` are valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUri(String);

impl SourceUri {
    /// Parse a source locator.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InvalidUri` if the input is empty or contains
    /// whitespace.
    pub fn parse(raw: &str) -> Result<Self, MediaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(MediaError::InvalidUri(raw.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The locator as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A contiguous `[start, end)` interval of media time, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Inclusive start
    pub start: f64,
    /// Exclusive end
    pub end: f64,
}

impl TimeRange {
    /// Create a range from its bounds in seconds
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Ordered set of media time intervals already downloaded or decodable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedRanges(Vec<TimeRange>);

impl BufferedRanges {
    /// Create from intervals in playback order
    pub fn new(ranges: Vec<TimeRange>) -> Self {
        Self(ranges)
    }

    /// The furthest buffered end point, ignoring non-finite ends.
    pub fn furthest_end(&self) -> Option<f64> {
        self.0
            .iter()
            .map(|range| range.end)
            .filter(|end| end.is_finite())
            .reduce(f64::max)
    }
}

/// Lifecycle notification emitted by a media source.
///
/// Notifications carry no payload; the controller reads the source's
/// properties when it applies one, the same way a page script reads the
/// element after an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// Playback started, or resumed after buffering
    Started,
    /// Playback paused
    Paused,
    /// Playback stalled waiting for data
    Stalled,
    /// Current position moved
    TimeAdvanced,
    /// More media was buffered
    BufferExtended,
    /// Duration and other metadata became available
    MetadataReady,
}

impl Notification {
    /// Every notification kind, in declaration order
    pub const ALL: [Notification; 6] = [
        Notification::Started,
        Notification::Paused,
        Notification::Stalled,
        Notification::TimeAdvanced,
        Notification::BufferExtended,
        Notification::MetadataReady,
    ];
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Notification::Started => "started",
            Notification::Paused => "paused",
            Notification::Stalled => "stalled",
            Notification::TimeAdvanced => "time-advanced",
            Notification::BufferExtended => "buffer-extended",
            Notification::MetadataReady => "metadata-ready",
        };
        write!(f, "{name}")
    }
}

/// Stream of notifications for a single subscription.
///
/// Dropping the stream releases the subscription.
pub type NotificationStream = BoxStream<'static, Notification>;

/// Capability surface of a playable media resource.
///
/// The resource and its playback engine are owned elsewhere. Implementors
/// must deliver every notification, in the order the engine emits them.
pub trait MediaSource: Send + Sync {
    /// Locator of the bound resource
    fn uri(&self) -> &SourceUri;

    /// Start or resume playback.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the engine rejects the request
    fn play(&self) -> Result<(), MediaError>;

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the engine rejects the request
    fn pause(&self) -> Result<(), MediaError>;

    /// Move the playhead to an absolute position in seconds.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the engine rejects the request
    fn set_current_time(&self, seconds: f64) -> Result<(), MediaError>;

    /// Mute or unmute audio output.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the engine rejects the request
    fn set_muted(&self, muted: bool) -> Result<(), MediaError>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Total duration in seconds. NaN or infinite while unknown.
    fn duration(&self) -> f64;

    /// Buffered intervals
    fn buffered(&self) -> BufferedRanges;

    /// Subscribe to lifecycle notifications.
    fn notifications(&self) -> NotificationStream;
}

/// Snapshot of the readable source properties at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaReadings {
    /// Playback position in seconds
    pub current_time: f64,
    /// Duration in seconds, possibly NaN or infinite
    pub duration: f64,
    /// Buffered intervals
    pub buffered: BufferedRanges,
}

impl MediaReadings {
    /// Read every property from the source
    pub fn capture(source: &dyn MediaSource) -> Self {
        Self {
            current_time: source.current_time(),
            duration: source.duration(),
            buffered: source.buffered(),
        }
    }
}

/// Normalize a reported duration: unknown, live and negative values become 0.
pub fn known_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}
