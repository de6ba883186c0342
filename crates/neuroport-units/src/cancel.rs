// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Broadcast-once cancellation signal
//!
//! Every unit selects on the signal's observer alongside its pending port
//! operation. Raising the signal drops the only sender of a zero-capacity
//! channel, which disconnects the observer for all clones at once. The sender
//! sits behind a mutex so that only the first `cancel()` call closes it.

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-shot, multi-observer shutdown notification shared by a group of units
#[derive(Clone)]
pub struct CancelSignal {
    inner: Arc<CancelInner>,
}

struct CancelInner {
    trigger: Mutex<Option<Sender<()>>>,
    observer: Receiver<()>,
    raised: AtomicBool,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (trigger, observer) = channel::bounded(0);
        Self {
            inner: Arc::new(CancelInner {
                trigger: Mutex::new(Some(trigger)),
                observer,
                raised: AtomicBool::new(false),
            }),
        }
    }

    /// Raise the signal. Returns `true` only for the call that actually raised it.
    pub fn cancel(&self) -> bool {
        let mut trigger = self.inner.trigger.lock();
        match trigger.take() {
            Some(sender) => {
                self.inner.raised.store(true, Ordering::Release);
                drop(sender);
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    /// Receiver that becomes ready (disconnected) once the signal is raised
    pub(crate) fn observer(&self) -> &Receiver<()> {
        &self.inner.observer
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_cancel_is_idempotent() {
        let signal = CancelSignal::new();
        assert!(!signal.is_cancelled());
        assert!(signal.cancel());
        assert!(!signal.cancel());
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_clones_observe_the_same_signal() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        clone.cancel();
        assert!(signal.is_cancelled());
        assert!(signal.observer().recv().is_err());
    }

    #[test]
    fn test_cancel_wakes_blocked_observers() {
        let signal = CancelSignal::new();
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let signal = signal.clone();
                thread::spawn(move || signal.observer().recv().is_err())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        signal.cancel();

        for waiter in waiters {
            assert!(waiter.join().unwrap());
        }
    }
}
