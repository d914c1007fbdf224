use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Cancelable one-shot timer that posts an event when it elapses
///
/// Each schedule gets a fresh sequence number. The event carries it back, and
/// [`TimerSlot::fire`] only accepts the number of the timer still pending, so
/// an event that raced a cancel is ignored.
#[derive(Debug, Default)]
pub struct TimerSlot {
    seq: u64,
    pending: Option<JoinHandle<()>>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `make_event(seq)` to be sent after `delay`, replacing any
    /// pending timer. Must be called inside a tokio runtime.
    pub fn schedule<E, F>(&mut self, delay: Duration, tx: &UnboundedSender<E>, make_event: F)
    where
        E: Send + 'static,
        F: FnOnce(u64) -> E + Send + 'static,
    {
        self.cancel();
        let seq = self.seq;
        let tx = tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(make_event(seq));
        }));
    }

    /// Cancel the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.seq = self.seq.wrapping_add(1);
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Accept an elapsed event. True only for the timer still pending.
    pub fn fire(&mut self, seq: u64) -> bool {
        if self.pending.is_some() && seq == self.seq {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
