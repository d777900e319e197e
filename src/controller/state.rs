use std::fmt;

/// What the transport currently shows.
///
/// Playing and buffering are separate variants, so the two can never be
/// reported at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    /// Nothing has happened since the source was bound
    #[default]
    Idle,

    /// Playback is paused
    Paused,

    /// Playback is running
    Playing,

    /// Playback is waiting for data
    Buffering,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Activity::Idle => "idle",
            Activity::Paused => "paused",
            Activity::Playing => "playing",
            Activity::Buffering => "buffering",
        };
        write!(f, "{label}")
    }
}

/// Playback state mirrored from the media source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    /// Current activity
    pub activity: Activity,

    /// Playback position in seconds, within `[0, total_seconds]` once the
    /// total is known
    pub elapsed_seconds: f64,

    /// Media duration in seconds, 0 until known
    pub total_seconds: f64,
}

impl PlaybackState {
    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.activity == Activity::Playing
    }

    /// Whether playback is waiting for data
    pub fn is_buffering(&self) -> bool {
        self.activity == Activity::Buffering
    }
}

/// Fill levels of the two timeline indicators, each within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimelineState {
    /// Elapsed share of the media
    pub progress_fraction: f64,

    /// Buffered share of the media
    pub buffered_fraction: f64,
}

/// Everything the controller derives from its media source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerState {
    /// Playback flags and times
    pub playback: PlaybackState,

    /// Timeline indicator levels
    pub timeline: TimelineState,
}

impl ControllerState {
    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Whether playback is waiting for data
    pub fn is_buffering(&self) -> bool {
        self.playback.is_buffering()
    }
}

/// `part / whole` clamped to `[0, 1]`, or 0 when `whole` is not a usable
/// positive number.
pub fn fraction_of(part: f64, whole: f64) -> f64 {
    if !(whole.is_finite() && whole > 0.0) || !part.is_finite() {
        return 0.0;
    }

    (part / whole).clamp(0.0, 1.0)
}
