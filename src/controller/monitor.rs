use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

use super::{reducer::reduce, state::ControllerState};
use crate::media::{MediaReadings, MediaSource, NotificationStream, SourceUri};
use crate::reactive::Property;

/// Applies a source's notifications to the shared controller state.
///
/// Holding the monitor keeps the subscription alive. Dropping it releases
/// the subscription: pending deliveries are discarded and the task is
/// aborted, which drops the notification stream.
pub(crate) struct SourceMonitor {
    handle: JoinHandle<()>,
    released: Arc<AtomicBool>,
}

impl SourceMonitor {
    /// Start applying `notifications` from `source` to `state`.
    ///
    /// The stream is taken by value so the caller can subscribe before it
    /// issues commands whose notifications must not be missed.
    #[instrument(skip_all, fields(uri = %source.uri()))]
    pub(crate) fn start(
        source: Arc<dyn MediaSource>,
        notifications: NotificationStream,
        state: Property<ControllerState>,
    ) -> Self {
        debug!("Starting notification monitoring");

        let released = Arc::new(AtomicBool::new(false));
        let task_released = Arc::clone(&released);

        let handle = tokio::spawn(async move {
            Self::apply_notifications(source, notifications, state, task_released).await;
        });

        Self { handle, released }
    }

    async fn apply_notifications(
        source: Arc<dyn MediaSource>,
        mut notifications: NotificationStream,
        state: Property<ControllerState>,
        released: Arc<AtomicBool>,
    ) {
        let uri: SourceUri = source.uri().clone();

        while let Some(notification) = notifications.next().await {
            if released.load(Ordering::Acquire) {
                break;
            }

            let readings = MediaReadings::capture(source.as_ref());
            trace!(%uri, %notification, ?readings, "Applying notification");

            state.update(|current| {
                if released.load(Ordering::Acquire) {
                    *current
                } else {
                    reduce(current, notification, &readings)
                }
            });
        }

        debug!(%uri, "Notification stream ended");
    }
}

impl Drop for SourceMonitor {
    fn drop(&mut self) {
        self.released.store(true, Ordering::Release);
        self.handle.abort();
    }
}
