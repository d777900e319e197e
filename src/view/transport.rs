use std::fmt;

use super::format_time;
use crate::config::PlayerConfig;
use crate::controller::{Activity, ControllerState};

/// Label shown over the video while playback waits for data
pub const LOADING_LABEL: &str = "Loading...";

const PROGRESS_CELL: char = '━';
const BUFFERED_CELL: char = '─';
const EMPTY_CELL: char = '·';

/// Which action the play/pause button offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIcon {
    /// Button starts playback
    Play,
    /// Button pauses playback
    Pause,
}

impl fmt::Display for ToggleIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleIcon::Play => write!(f, "▶"),
            ToggleIcon::Pause => write!(f, "⏸"),
        }
    }
}

/// Everything the rendering layer needs to draw the transport.
///
/// Derived from controller state on demand; holds no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportView {
    /// Play/pause button face
    pub toggle_icon: ToggleIcon,
    /// Overlay label while buffering
    pub loading_label: Option<&'static str>,
    /// Formatted elapsed and total time
    pub time_text: String,
    /// Width of the progress indicator, percent of the track
    pub progress_percent: f64,
    /// Width of the buffered indicator, percent of the track
    pub buffered_percent: f64,
    /// Media title
    pub title: Option<String>,
    /// Poster image, only until playback first leaves the idle state
    pub poster: Option<String>,
}

impl TransportView {
    /// Derive the view from controller state and mount options.
    pub fn derive(state: &ControllerState, options: &PlayerConfig) -> Self {
        let playback = &state.playback;

        Self {
            toggle_icon: if playback.is_playing() {
                ToggleIcon::Pause
            } else {
                ToggleIcon::Play
            },
            loading_label: playback.is_buffering().then_some(LOADING_LABEL),
            time_text: format_time(playback.elapsed_seconds, playback.total_seconds),
            progress_percent: state.timeline.progress_fraction * 100.0,
            buffered_percent: state.timeline.buffered_fraction * 100.0,
            title: options.title.clone(),
            poster: options
                .poster
                .clone()
                .filter(|_| playback.activity == Activity::Idle),
        }
    }

    /// Build the timeline track as `width` cells.
    ///
    /// Progress cells are drawn over buffered cells, which are drawn over
    /// empty track.
    pub fn track_cells(&self, width: usize) -> String {
        let progress = cells_for(self.progress_percent, width);
        let buffered = cells_for(self.buffered_percent, width).max(progress);

        (0..width)
            .map(|cell| {
                if cell < progress {
                    PROGRESS_CELL
                } else if cell < buffered {
                    BUFFERED_CELL
                } else {
                    EMPTY_CELL
                }
            })
            .collect()
    }

    /// Render the transport as one line of text with a `width`-cell track.
    pub fn render_line(&self, width: usize) -> String {
        let mut line = format!(
            "{} {} {}",
            self.toggle_icon,
            self.track_cells(width),
            self.time_text
        );

        if let Some(label) = self.loading_label {
            line.push_str("  ");
            line.push_str(label);
        }

        line
    }
}

fn cells_for(percent: f64, width: usize) -> usize {
    let share = (percent / 100.0).clamp(0.0, 1.0);
    ((width as f64) * share) as usize
}
