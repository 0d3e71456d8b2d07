use std::future::Future;

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::debug;


/// A live view of an owner's entities.
///
/// Every change delivers a complete, newest-first snapshot. The background task
/// feeding the subscription is stopped exactly once: either by [`unsubscribe`][Self::unsubscribe]
/// or when the handle is dropped, whichever comes first.
pub struct Subscription<E> {
    snapshots: UnboundedReceiver<Vec<E>>,

    task: Option<JoinHandle<()>>,

    kind: &'static str,
}

impl<E> Subscription<E>
where
    E: Send + 'static,
{
    /// Spawns the task that feeds this subscription.
    ///
    /// The task receives the sending half of the snapshot channel and should
    /// end once sending fails (the subscription is gone).
    pub(crate) fn spawn<F, Fut>(kind: &'static str, feed: F) -> Self
    where
        F: FnOnce(SnapshotSender<E>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, snapshots) = mpsc::unbounded_channel();
        let task = tokio::spawn(feed(SnapshotSender { sender }));

        debug!(kind = kind, "Subscription started.");

        Self {
            snapshots,
            task: Some(task),
            kind,
        }
    }
}

impl<E> Subscription<E> {
    /// Waits for the next snapshot. Returns `None` once the feeding task has ended.
    pub async fn next_snapshot(&mut self) -> Option<Vec<E>> {
        self.snapshots.recv().await
    }

    /// Returns the most recent snapshot that has already arrived, if any,
    /// skipping older ones.
    pub fn latest_snapshot(&mut self) -> Option<Vec<E>> {
        let mut latest = None;

        while let Ok(snapshot) = self.snapshots.try_recv() {
            latest = Some(snapshot);
        }

        latest
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Stops the subscription.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.snapshots.close();

            debug!(kind = self.kind, "Subscription released.");
        }
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.release();
    }
}



/// Sending half handed to the task feeding a [`Subscription`].
pub(crate) struct SnapshotSender<E> {
    sender: UnboundedSender<Vec<E>>,
}

impl<E> SnapshotSender<E> {
    /// Returns `false` if the subscription has been released.
    pub(crate) fn send(&self, snapshot: Vec<E>) -> bool {
        self.sender.send(snapshot).is_ok()
    }
}
