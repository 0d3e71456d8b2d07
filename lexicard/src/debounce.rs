use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle};


/// A text input whose value is only applied after it stops changing.
///
/// Every [`set`][Self::set] restarts the quiet period; the value is applied
/// once no further input arrived for the configured delay.
/// [`apply_now`][Self::apply_now] skips the wait (e.g. on Enter).
pub struct DebouncedField<T> {
    input: watch::Sender<T>,

    applied: watch::Receiver<T>,

    applied_sender: watch::Sender<T>,

    task: JoinHandle<()>,
}

impl<T> DebouncedField<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial_value: T, delay: Duration) -> Self {
        let (input, input_receiver) = watch::channel(initial_value.clone());
        let (applied_sender, applied) = watch::channel(initial_value);

        let task = tokio::spawn(debounce_input(
            input_receiver,
            applied_sender.clone(),
            delay,
        ));

        Self {
            input,
            applied,
            applied_sender,
            task,
        }
    }

    /// Records new input. It will be applied after the quiet period.
    pub fn set(&self, value: T) {
        self.input.send_replace(value);
    }

    /// Applies a value immediately, without waiting for the quiet period.
    pub fn apply_now(&self, value: T) {
        self.input.send_replace(value.clone());
        publish_if_changed(&self.applied_sender, value);
    }

    /// The value most recently typed (applied or not).
    pub fn pending(&self) -> T {
        self.input.borrow().clone()
    }

    /// The value most recently applied.
    pub fn applied(&self) -> T {
        self.applied.borrow().clone()
    }

    /// Waits until a new value is applied and returns it.
    pub async fn next_applied(&mut self) -> T {
        // The sender lives in `self`, so the channel can not close while we wait.
        let _ = self.applied.changed().await;
        self.applied.borrow_and_update().clone()
    }
}

impl<T> Drop for DebouncedField<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}


fn publish_if_changed<T>(applied: &watch::Sender<T>, value: T)
where
    T: PartialEq,
{
    applied.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}


async fn debounce_input<T>(
    mut input: watch::Receiver<T>,
    applied: watch::Sender<T>,
    delay: Duration,
) where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    loop {
        if input.changed().await.is_err() {
            return;
        }

        // Keep restarting the timer for as long as input keeps coming in.
        loop {
            tokio::select! {
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = tokio::time::sleep(delay) => break,
            }
        }

        let value = input.borrow_and_update().clone();
        publish_if_changed(&applied, value);
    }
}
