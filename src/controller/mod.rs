//! Playback controller.
//!
//! Mirrors a bound [`MediaSource`] into a small [`ControllerState`] and
//! turns transport gestures into source commands. Notifications are applied
//! by a single pure reducer, so the subscription only has to be rebuilt
//! when the source itself changes.

mod monitor;
mod reducer;
mod seek;
mod state;

use std::sync::Arc;

use futures::Stream;
use tracing::{debug, info, instrument, warn};

pub use reducer::reduce;
pub use seek::{SeekRejection, TrackBounds, seek_target};
pub use state::{Activity, ControllerState, PlaybackState, TimelineState, fraction_of};

use monitor::SourceMonitor;

use crate::config::PlayerConfig;
use crate::media::{MediaError, MediaSource, SourceUri};
use crate::reactive::Property;
use crate::view::TransportView;

struct Binding {
    source: Arc<dyn MediaSource>,
    _monitor: SourceMonitor,
}

/// Keeps transport state in sync with one media source at a time.
///
/// Binding a source requires a running tokio runtime; the notification
/// subscription is serviced by a task on it.
pub struct PlaybackController {
    options: PlayerConfig,
    state: Property<ControllerState>,
    binding: Option<Binding>,
}

impl PlaybackController {
    /// Create an unbound controller with default state.
    pub fn new(options: PlayerConfig) -> Self {
        Self {
            options,
            state: Property::new(ControllerState::default()),
            binding: None,
        }
    }

    /// Mount options the controller was created with
    pub fn options(&self) -> &PlayerConfig {
        &self.options
    }

    /// Bind a media source, replacing any previous one.
    ///
    /// The previous subscription is released before the state is reset and
    /// the new subscription is acquired. The mount options are then applied:
    /// the source is muted if requested and asked to play when auto-play is
    /// on. Auto-play does not write state optimistically; the source's own
    /// `Started` notification does.
    #[instrument(skip_all, fields(uri = %source.uri()))]
    pub fn bind(&mut self, source: Arc<dyn MediaSource>) {
        if let Some(previous) = self.binding.take() {
            debug!(previous = %previous.source.uri(), "Releasing previous source");
        }
        self.state.set(ControllerState::default());

        let notifications = source.notifications();
        let monitor = SourceMonitor::start(Arc::clone(&source), notifications, self.state.clone());

        if self.options.muted {
            accepted("set_muted", source.set_muted(true));
        }
        if self.options.auto_play {
            accepted("play", source.play());
        }

        info!("Media source bound");
        self.binding = Some(Binding {
            source,
            _monitor: monitor,
        });
    }

    /// Release the bound source and return to default state.
    pub fn unbind(&mut self) {
        if let Some(binding) = self.binding.take() {
            info!(uri = %binding.source.uri(), "Media source unbound");
        }
        self.state.set(ControllerState::default());
    }

    /// Whether a source is currently bound
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Locator of the bound source, if any
    pub fn source_uri(&self) -> Option<&SourceUri> {
        self.binding.as_ref().map(|binding| binding.source.uri())
    }

    /// Current derived state
    pub fn state(&self) -> ControllerState {
        self.state.get()
    }

    /// Stream of derived states, starting with the current one.
    pub fn watch(&self) -> impl Stream<Item = ControllerState> + Send + use<> {
        self.state.watch()
    }

    /// Current transport view.
    pub fn view(&self) -> TransportView {
        TransportView::derive(&self.state(), &self.options)
    }

    /// Play if paused, pause if playing.
    ///
    /// The new label is written immediately, before the source confirms it,
    /// and is overwritten by whatever the source reports next. A command the
    /// source rejects outright leaves the state untouched.
    pub fn toggle(&self) {
        let Some(binding) = &self.binding else {
            debug!("Toggle ignored: no media source bound");
            return;
        };

        let playing = self.state.get().is_playing();
        let (command, result, activity) = if playing {
            ("pause", binding.source.pause(), Activity::Paused)
        } else {
            ("play", binding.source.play(), Activity::Playing)
        };

        if accepted(command, result) {
            self.state.update(|current| {
                let mut next = *current;
                next.playback.activity = activity;
                next
            });
        }
    }

    /// Jump to `fraction` of the media duration.
    ///
    /// Fractions outside `[0, 1]` and unknown durations are ignored. State is
    /// not touched here; the source's next `TimeAdvanced` reconciles it.
    pub fn seek(&self, fraction: f64) {
        let Some(binding) = &self.binding else {
            debug!("Seek ignored: no media source bound");
            return;
        };

        match seek_target(fraction, binding.source.duration()) {
            Ok(target) => {
                debug!(fraction, target, "Seeking");
                accepted("set_current_time", binding.source.set_current_time(target));
            }
            Err(rejection) => {
                debug!(?rejection, "Seek ignored");
            }
        }
    }

    /// Seek to where a pointer landed on the timeline track.
    pub fn seek_to_pointer(&self, pointer_x: f64, bounds: TrackBounds) {
        self.seek(bounds.fraction_at(pointer_x));
    }
}

fn accepted(command: &'static str, result: Result<(), MediaError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(command, error = %e, "Media source rejected command");
            false
        }
    }
}
