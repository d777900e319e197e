use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive cell that can be watched for changes.
///
/// When the value changes, all watchers are notified automatically.
/// Each watcher gets the current value immediately when subscribing.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Set a new value and notify watchers if it differs from the current one.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        });
    }

    /// Replace the value with one computed from the current value.
    ///
    /// The read and the write happen under the channel lock, so two
    /// concurrent updates never overwrite each other's result. Watchers
    /// are only notified when the computed value differs.
    pub(crate) fn update<F>(&self, compute: F)
    where
        F: FnOnce(&T) -> T,
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            let next = compute(current);
            if *current != next {
                *current = next;
                true
            } else {
                false
            }
        });
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + use<T> {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn update_computes_from_current_value() {
        let counter = Property::new(1u32);

        counter.update(|n| n + 1);
        counter.update(|n| n * 10);

        assert_eq!(counter.get(), 20);
    }

    #[tokio::test]
    async fn watchers_skip_unchanged_values() {
        let label = Property::new(String::from("paused"));
        let mut changes = label.watch();

        assert_eq!(changes.next().await.as_deref(), Some("paused"));

        label.set(String::from("paused"));
        label.set(String::from("playing"));

        assert_eq!(changes.next().await.as_deref(), Some("playing"));
    }
}
