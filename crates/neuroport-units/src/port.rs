// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rendezvous ports
//!
//! A [`Port`] wraps a zero-capacity crossbeam channel: a send completes only
//! when a receive takes the value, and vice versa. Nothing is ever queued.
//!
//! # Blocking
//! - `send()` / `recv()` block until a partner arrives or the cancellation
//!   signal is raised. These are what units use.
//! - `send_timeout()` / `recv_timeout()` give up after a deadline. These are
//!   for callers outside the protocol (drivers, tests) that need to detect a
//!   stalled partner.
//! - `send_bounded()` / `recv_bounded()` give up at the deadline or as soon as
//!   the signal is raised, whichever comes first.

use crate::cancel::CancelSignal;
use crate::error::ExchangeError;
use crossbeam::channel::{self, select, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use std::time::Duration;

/// A scalar carried on a port. Its meaning depends on the port and phase.
pub type Signal = f64;

/// Synchronous, unbuffered handoff shared by the units it connects
#[derive(Debug, Clone)]
pub struct Port {
    tx: Sender<Signal>,
    rx: Receiver<Signal>,
}

impl Port {
    pub fn new() -> Self {
        let (tx, rx) = channel::bounded(0);
        Self { tx, rx }
    }

    /// Block until a receiver takes `value`, or the signal is raised
    pub fn send(&self, value: Signal, cancel: &CancelSignal) -> Result<(), ExchangeError> {
        if cancel.is_cancelled() {
            return Err(ExchangeError::Cancelled);
        }
        select! {
            send(self.tx, value) -> sent => sent.map_err(|_| ExchangeError::Disconnected),
            recv(cancel.observer()) -> _ => Err(ExchangeError::Cancelled),
        }
    }

    /// Block until a sender hands over a value, or the signal is raised
    pub fn recv(&self, cancel: &CancelSignal) -> Result<Signal, ExchangeError> {
        if cancel.is_cancelled() {
            return Err(ExchangeError::Cancelled);
        }
        select! {
            recv(self.rx) -> received => received.map_err(|_| ExchangeError::Disconnected),
            recv(cancel.observer()) -> _ => Err(ExchangeError::Cancelled),
        }
    }

    pub fn send_timeout(&self, value: Signal, timeout: Duration) -> Result<(), ExchangeError> {
        self.tx.send_timeout(value, timeout).map_err(|err| match err {
            SendTimeoutError::Timeout(_) => ExchangeError::TimedOut(timeout),
            SendTimeoutError::Disconnected(_) => ExchangeError::Disconnected,
        })
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Signal, ExchangeError> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => ExchangeError::TimedOut(timeout),
            RecvTimeoutError::Disconnected => ExchangeError::Disconnected,
        })
    }

    /// Hand over `value` within `timeout` unless the signal is raised first
    pub fn send_bounded(
        &self,
        value: Signal,
        timeout: Duration,
        cancel: &CancelSignal,
    ) -> Result<(), ExchangeError> {
        if cancel.is_cancelled() {
            return Err(ExchangeError::Cancelled);
        }
        select! {
            send(self.tx, value) -> sent => sent.map_err(|_| ExchangeError::Disconnected),
            recv(cancel.observer()) -> _ => Err(ExchangeError::Cancelled),
            default(timeout) => Err(ExchangeError::TimedOut(timeout)),
        }
    }

    /// Take a value within `timeout` unless the signal is raised first
    pub fn recv_bounded(
        &self,
        timeout: Duration,
        cancel: &CancelSignal,
    ) -> Result<Signal, ExchangeError> {
        if cancel.is_cancelled() {
            return Err(ExchangeError::Cancelled);
        }
        select! {
            recv(self.rx) -> received => received.map_err(|_| ExchangeError::Disconnected),
            recv(cancel.observer()) -> _ => Err(ExchangeError::Cancelled),
            default(timeout) => Err(ExchangeError::TimedOut(timeout)),
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::new()
    }
}

/// The four ports of an addressable unit
///
/// Forward values enter on `input` and leave on `output`; errors enter on
/// `upfeed` and leave on `downfeed`.
#[derive(Debug, Clone, Default)]
pub struct PortSet {
    pub input: Port,
    pub output: Port,
    pub upfeed: Port,
    pub downfeed: Port,
}

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const BLOCKED: Duration = Duration::from_millis(50);
    const PATIENCE: Duration = Duration::from_secs(2);

    #[test]
    fn test_send_without_receiver_does_not_complete() {
        let port = Port::new();
        assert_eq!(
            port.send_timeout(1.0, BLOCKED),
            Err(ExchangeError::TimedOut(BLOCKED))
        );
    }

    #[test]
    fn test_rendezvous_hands_over_value() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        let sender = {
            let port = port.clone();
            let cancel = cancel.clone();
            thread::spawn(move || port.send(4.5, &cancel))
        };

        assert_eq!(port.recv_timeout(PATIENCE), Ok(4.5));
        assert_eq!(sender.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_cancel_unblocks_pending_receive() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        let receiver = {
            let port = port.clone();
            let cancel = cancel.clone();
            thread::spawn(move || port.recv(&cancel))
        };

        thread::sleep(BLOCKED);
        cancel.cancel();
        assert_eq!(receiver.join().unwrap(), Err(ExchangeError::Cancelled));
    }

    #[test]
    fn test_bounded_receive_times_out_without_partner() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        assert_eq!(
            port.recv_bounded(BLOCKED, &cancel),
            Err(ExchangeError::TimedOut(BLOCKED))
        );
        assert_eq!(
            port.send_bounded(1.0, BLOCKED, &cancel),
            Err(ExchangeError::TimedOut(BLOCKED))
        );
    }

    #[test]
    fn test_cancel_cuts_bounded_receive_short() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        let receiver = {
            let port = port.clone();
            let cancel = cancel.clone();
            thread::spawn(move || {
                let started = std::time::Instant::now();
                (port.recv_bounded(Duration::from_secs(30), &cancel), started.elapsed())
            })
        };

        thread::sleep(BLOCKED);
        cancel.cancel();
        let (result, waited) = receiver.join().unwrap();
        assert_eq!(result, Err(ExchangeError::Cancelled));
        assert!(waited < Duration::from_secs(10), "waited {:?}", waited);
    }

    #[test]
    fn test_bounded_send_hands_over_value() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        let sender = {
            let port = port.clone();
            let cancel = cancel.clone();
            thread::spawn(move || port.send_bounded(2.5, PATIENCE, &cancel))
        };

        assert_eq!(port.recv_bounded(PATIENCE, &cancel), Ok(2.5));
        assert_eq!(sender.join().unwrap(), Ok(()));
    }

    #[test]
    fn test_exchange_after_cancel_fails_immediately() {
        let port = Port::new();
        let cancel = CancelSignal::new();
        cancel.cancel();
        assert_eq!(port.send(1.0, &cancel), Err(ExchangeError::Cancelled));
        assert_eq!(port.recv(&cancel), Err(ExchangeError::Cancelled));
        assert_eq!(
            port.recv_bounded(PATIENCE, &cancel),
            Err(ExchangeError::Cancelled)
        );
    }
}
