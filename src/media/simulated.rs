use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use super::{
    BufferedRanges, MediaError, MediaSource, Notification, NotificationStream, SourceUri, TimeRange,
};

/// Seconds of media the simulated network keeps buffered ahead of the playhead.
const BUFFER_LOOKAHEAD_SECS: f64 = 8.0;

/// Command received by a [`SimulatedSource`], recorded in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCommand {
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `set_current_time(seconds)`
    SetCurrentTime(f64),
    /// `set_muted(muted)`
    SetMuted(bool),
}

#[derive(Debug)]
struct Engine {
    current_time: f64,
    duration: f64,
    buffered: Vec<TimeRange>,
    paused: bool,
    stalled: bool,
    muted: bool,
    closed: bool,
    commands: Vec<MediaCommand>,
    subscribers: Vec<mpsc::UnboundedSender<Notification>>,
}

/// In-process media engine implementing [`MediaSource`].
///
/// Time only moves when [`tick`](Self::tick) is called, and notifications
/// are only emitted when the driver asks for them, which makes the source
/// deterministic. With [`with_feedback`](Self::with_feedback) commands also
/// emit the notification a real engine would send back.
///
/// Every subscriber has its own unbounded queue, so a slow consumer never
/// loses a notification.
#[derive(Debug)]
pub struct SimulatedSource {
    uri: SourceUri,
    engine: Mutex<Engine>,
    feedback: bool,
}

impl SimulatedSource {
    /// Create a paused source whose duration is not yet known.
    pub fn new(uri: SourceUri) -> Self {
        Self {
            uri,
            engine: Mutex::new(Engine {
                current_time: 0.0,
                duration: f64::NAN,
                buffered: Vec::new(),
                paused: true,
                stalled: false,
                muted: false,
                closed: false,
                commands: Vec::new(),
                subscribers: Vec::new(),
            }),
            feedback: false,
        }
    }

    /// Echo commands back as notifications, the way a browser engine does.
    pub fn with_feedback(mut self) -> Self {
        self.feedback = true;
        self
    }

    fn engine(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a notification to every current subscriber.
    pub fn emit(&self, notification: Notification) {
        let mut engine = self.engine();
        engine
            .subscribers
            .retain(|subscriber| subscriber.send(notification).is_ok());

        if engine.subscribers.is_empty() {
            debug!(%notification, uri = %self.uri, "No subscribers for notification");
        }
    }

    /// Number of live notification subscriptions.
    pub fn subscriber_count(&self) -> usize {
        let mut engine = self.engine();
        engine.subscribers.retain(|subscriber| !subscriber.is_closed());
        engine.subscribers.len()
    }

    /// Commands received so far.
    pub fn commands(&self) -> Vec<MediaCommand> {
        self.engine().commands.clone()
    }

    /// Whether audio output is muted
    pub fn is_muted(&self) -> bool {
        self.engine().muted
    }

    /// Whether the engine is paused
    pub fn is_paused(&self) -> bool {
        self.engine().paused
    }

    /// Report the duration and emit `MetadataReady`.
    pub fn load_metadata(&self, duration: f64) {
        self.engine().duration = duration;
        self.emit(Notification::MetadataReady);
    }

    /// Move the playhead without a command, as the engine does while playing.
    pub fn set_position(&self, seconds: f64) {
        self.engine().current_time = seconds;
    }

    /// Replace the buffered ranges and emit `BufferExtended`.
    pub fn set_buffered(&self, ranges: Vec<TimeRange>) {
        self.engine().buffered = ranges;
        self.emit(Notification::BufferExtended);
    }

    /// Starve the engine of data and emit `Stalled`.
    pub fn stall(&self) {
        self.engine().stalled = true;
        self.emit(Notification::Stalled);
    }

    /// Recover from a stall and emit `Started` if playback was requested.
    pub fn recover(&self) {
        let resumed = {
            let mut engine = self.engine();
            let was_stalled = engine.stalled;
            engine.stalled = false;
            was_stalled && !engine.paused
        };

        if resumed {
            self.emit(Notification::Started);
        }
    }

    /// Shut the engine down; later commands fail with `SourceClosed`.
    pub fn close(&self) {
        self.engine().closed = true;
    }

    /// Advance playback by `seconds` of media time.
    ///
    /// Does nothing while paused or stalled. Extends the buffer ahead of the
    /// playhead, and pauses at the end of the media.
    ///
    /// Returns whether the playhead moved.
    pub fn tick(&self, seconds: f64) -> bool {
        let (buffer_grew, reached_end) = {
            let mut engine = self.engine();
            if engine.paused || engine.stalled || engine.closed {
                return false;
            }

            let duration = engine.duration;
            let limit = if duration.is_finite() { duration } else { f64::MAX };
            engine.current_time = (engine.current_time + seconds).min(limit);

            let position = engine.current_time;
            let target_end = (position + BUFFER_LOOKAHEAD_SECS).min(limit);
            let buffer_grew = extend_buffer(&mut engine.buffered, position, target_end);

            let reached_end = duration.is_finite() && position >= duration;
            if reached_end {
                engine.paused = true;
            }

            (buffer_grew, reached_end)
        };

        self.emit(Notification::TimeAdvanced);
        if buffer_grew {
            self.emit(Notification::BufferExtended);
        }
        if reached_end {
            self.emit(Notification::Paused);
        }

        true
    }

    fn record(&self, command: MediaCommand) -> Result<(), MediaError> {
        let mut engine = self.engine();
        if engine.closed {
            return Err(MediaError::SourceClosed);
        }

        engine.commands.push(command);
        match command {
            MediaCommand::Play => engine.paused = false,
            MediaCommand::Pause => engine.paused = true,
            MediaCommand::SetCurrentTime(seconds) => engine.current_time = seconds,
            MediaCommand::SetMuted(muted) => engine.muted = muted,
        }

        Ok(())
    }

    fn echo(&self, notification: Notification) {
        if self.feedback {
            self.emit(notification);
        }
    }
}

fn extend_buffer(buffered: &mut Vec<TimeRange>, position: f64, target_end: f64) -> bool {
    if let Some(range) = buffered
        .iter_mut()
        .find(|range| range.start <= position && position <= range.end)
    {
        if target_end > range.end {
            range.end = target_end;
            return true;
        }
        return false;
    }

    buffered.push(TimeRange::new(position, target_end));
    buffered.sort_by(|a, b| a.start.total_cmp(&b.start));
    true
}

impl MediaSource for SimulatedSource {
    fn uri(&self) -> &SourceUri {
        &self.uri
    }

    fn play(&self) -> Result<(), MediaError> {
        self.record(MediaCommand::Play)?;
        self.echo(Notification::Started);
        Ok(())
    }

    fn pause(&self) -> Result<(), MediaError> {
        self.record(MediaCommand::Pause)?;
        self.echo(Notification::Paused);
        Ok(())
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), MediaError> {
        if !seconds.is_finite() {
            return Err(MediaError::CommandFailed {
                command: "set_current_time",
                details: format!("non-finite position {seconds}"),
            });
        }

        self.record(MediaCommand::SetCurrentTime(seconds))?;
        self.echo(Notification::TimeAdvanced);
        Ok(())
    }

    fn set_muted(&self, muted: bool) -> Result<(), MediaError> {
        self.record(MediaCommand::SetMuted(muted))
    }

    fn current_time(&self) -> f64 {
        self.engine().current_time
    }

    fn duration(&self) -> f64 {
        self.engine().duration
    }

    fn buffered(&self) -> BufferedRanges {
        BufferedRanges::new(self.engine().buffered.clone())
    }

    fn notifications(&self) -> NotificationStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.engine().subscribers.push(tx);

        UnboundedReceiverStream::new(rx).boxed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn source() -> SimulatedSource {
        SimulatedSource::new(SourceUri::parse("/video/sample.mp4").unwrap())
    }

    #[test]
    fn tick_is_inert_while_paused() {
        let source = source();
        source.load_metadata(30.0);

        assert!(!source.tick(1.0));
        assert_eq!(source.current_time(), 0.0);
    }

    #[test]
    fn tick_advances_and_buffers_ahead() {
        let source = source();
        source.load_metadata(30.0);
        source.play().unwrap();

        assert!(source.tick(2.0));
        assert_eq!(source.current_time(), 2.0);
        assert_eq!(source.buffered().furthest_end(), Some(10.0));
    }

    #[test]
    fn tick_stops_at_end_of_media() {
        let source = source();
        source.load_metadata(3.0);
        source.play().unwrap();

        source.tick(5.0);

        assert_eq!(source.current_time(), 3.0);
        assert!(source.is_paused());
        assert!(!source.tick(1.0));
    }

    #[test]
    fn closed_source_rejects_commands() {
        let source = source();
        source.close();

        assert_eq!(source.play(), Err(MediaError::SourceClosed));
        assert!(source.commands().is_empty());
    }

    #[test]
    fn seek_to_non_finite_position_fails() {
        let source = source();

        assert!(matches!(
            source.set_current_time(f64::NAN),
            Err(MediaError::CommandFailed { .. })
        ));
    }

    #[tokio::test]
    async fn feedback_echoes_commands_as_notifications() {
        let source = source().with_feedback();
        let mut notifications = source.notifications();

        source.play().unwrap();
        source.pause().unwrap();

        assert_eq!(notifications.next().await, Some(Notification::Started));
        assert_eq!(notifications.next().await, Some(Notification::Paused));
    }

    #[tokio::test]
    async fn slow_subscriber_receives_every_notification() {
        let source = source();
        let mut notifications = source.notifications();

        source.emit(Notification::Started);
        for _ in 0..200 {
            source.emit(Notification::BufferExtended);
        }
        source.emit(Notification::Paused);

        assert_eq!(notifications.next().await, Some(Notification::Started));
        for _ in 0..200 {
            assert_eq!(notifications.next().await, Some(Notification::BufferExtended));
        }
        assert_eq!(notifications.next().await, Some(Notification::Paused));
    }

    #[test]
    fn dropping_stream_releases_subscription() {
        let source = source();
        let notifications = source.notifications();
        assert_eq!(source.subscriber_count(), 1);

        drop(notifications);

        assert_eq!(source.subscriber_count(), 0);
    }
}
