use crate::media::known_duration;

/// Horizontal extent of the timeline track, in the same units as pointer
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    /// Left edge of the track
    pub left: f64,
    /// Width of the track
    pub width: f64,
}

impl TrackBounds {
    /// Create bounds from the track's left edge and width
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Position of `pointer_x` along the track.
    ///
    /// Not clamped: a pointer released outside the track yields a value
    /// below 0 or above 1, and a degenerate track yields NaN or infinity.
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        (pointer_x - self.left) / self.width
    }
}

/// Why a seek request did not produce a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekRejection {
    /// Fraction outside `[0, 1]` or not a number
    OutOfRange(f64),
    /// Duration is 0 or not finite
    UnknownDuration,
}

/// Media time to jump to for a pointer `fraction` of a `duration`.
///
/// # Errors
///
/// Returns a [`SeekRejection`] when the fraction is out of range or the
/// duration is unknown; no command should be issued in either case.
pub fn seek_target(fraction: f64, duration: f64) -> Result<f64, SeekRejection> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(SeekRejection::OutOfRange(fraction));
    }

    let duration = known_duration(duration);
    if duration == 0.0 {
        return Err(SeekRejection::UnknownDuration);
    }

    Ok(duration * fraction)
}
