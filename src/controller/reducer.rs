use super::state::{Activity, ControllerState, fraction_of};
use crate::media::{MediaReadings, Notification, known_duration};

/// Apply one notification to the controller state.
///
/// Pure: the result depends only on the previous state, the notification,
/// and the source readings taken when it was delivered. Applying the same
/// notification with the same readings twice yields the same state as once.
pub fn reduce(
    state: &ControllerState,
    notification: Notification,
    readings: &MediaReadings,
) -> ControllerState {
    let mut next = *state;

    match notification {
        Notification::Started => {
            next.playback.activity = Activity::Playing;
        }

        Notification::Paused => {
            next.playback.activity = Activity::Paused;
        }

        Notification::Stalled => {
            next.playback.activity = Activity::Buffering;
        }

        Notification::TimeAdvanced => {
            // A stall already cleared the playing flag
            if next.playback.activity == Activity::Buffering {
                next.playback.activity = Activity::Paused;
            }

            let total = known_duration(readings.duration);
            next.playback.total_seconds = total;
            next.playback.elapsed_seconds = clamp_elapsed(readings.current_time, total);
            next.timeline.progress_fraction = fraction_of(next.playback.elapsed_seconds, total);
        }

        Notification::BufferExtended => {
            let duration = known_duration(readings.duration);
            if let Some(end) = readings.buffered.furthest_end()
                && duration > 0.0
            {
                next.timeline.buffered_fraction = fraction_of(end, duration);
            }
        }

        Notification::MetadataReady => {
            let total = known_duration(readings.duration);
            next.playback.total_seconds = total;
            next.playback.elapsed_seconds = clamp_elapsed(next.playback.elapsed_seconds, total);
            next.timeline.progress_fraction = fraction_of(next.playback.elapsed_seconds, total);
        }
    }

    next
}

fn clamp_elapsed(position: f64, total: f64) -> f64 {
    if !position.is_finite() || position < 0.0 {
        return 0.0;
    }

    if total > 0.0 { position.min(total) } else { position }
}
