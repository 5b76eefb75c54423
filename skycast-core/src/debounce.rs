//! Debounced delivery of rapidly-changing inputs (e.g. search keystrokes).
//!
//! The debouncer is an explicit object owning at most one pending timer;
//! there is no process-wide state. Scheduling a new value cancels the
//! previous one, so only the last value of a burst survives the quiet
//! period and reaches the receiver.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::Sender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer and the receiving end its values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { delay, tx, pending: None }, rx)
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Schedule `value` for delivery after the quiet period, replacing any
    /// previously scheduled value.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value).await;
        }));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
