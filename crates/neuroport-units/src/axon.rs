// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Axon: fan-out broadcaster
//!
//! Relays each received value exactly `count` times on its output port, one
//! rendezvous at a time, before accepting the next input. A cancelled
//! broadcast is cut short without telling the receivers still waiting.

use crate::cancel::CancelSignal;
use crate::error::{ExchangeError, Result};
use crate::fan::validate_count;
use crate::port::Port;
use crate::unit::{Unit, LOG_TARGET};
use tracing::debug;

pub struct Axon {
    name: String,
    count: usize,
    input: Port,
    output: Port,
    delivered: usize,
    broadcasts: u64,
    verbose: bool,
}

impl Axon {
    pub fn new(count: usize, input: Port, output: Port) -> Result<Self> {
        validate_count("axon", count)?;
        Ok(Self {
            name: "axon".to_string(),
            count,
            input,
            output,
            delivered: 0,
            broadcasts: 0,
            verbose: false,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Copies handed out for the broadcast in progress
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Completed broadcasts
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts
    }
}

impl Unit for Axon {
    fn kind(&self) -> &'static str {
        "axon"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        let value = self.input.recv(cancel)?;
        self.delivered = 0;

        while self.delivered < self.count {
            self.output.send(value, cancel)?;
            self.delivered += 1;
        }

        if self.verbose {
            debug!(target: LOG_TARGET, unit = %self.name, value, copies = self.count, "axon broadcast");
        }
        self.delivered = 0;
        self.broadcasts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::spawn_unit;
    use std::time::Duration;

    const BLOCKED: Duration = Duration::from_millis(50);
    const PATIENCE: Duration = Duration::from_secs(2);

    #[test]
    fn test_zero_count_rejected() {
        assert!(Axon::new(0, Port::new(), Port::new()).is_err());
    }

    #[test]
    fn test_delivers_exactly_count_copies() {
        let cancel = CancelSignal::new();
        let (input, output) = (Port::new(), Port::new());
        let handle =
            spawn_unit(Axon::new(3, input.clone(), output.clone()).unwrap(), &cancel).unwrap();

        input.send_timeout(7.0, PATIENCE).unwrap();
        for _ in 0..3 {
            assert_eq!(output.recv_timeout(PATIENCE), Ok(7.0));
        }
        // A fourth copy never arrives
        assert_eq!(output.recv_timeout(BLOCKED), Err(ExchangeError::TimedOut(BLOCKED)));

        input.send_timeout(8.0, PATIENCE).unwrap();
        assert_eq!(output.recv_timeout(PATIENCE), Ok(8.0));

        cancel.cancel();
        handle.join().unwrap();
    }

    #[test]
    fn test_short_read_blocks_next_input() {
        let cancel = CancelSignal::new();
        let (input, output) = (Port::new(), Port::new());
        let handle =
            spawn_unit(Axon::new(3, input.clone(), output.clone()).unwrap(), &cancel).unwrap();

        input.send_timeout(1.0, PATIENCE).unwrap();
        output.recv_timeout(PATIENCE).unwrap();
        output.recv_timeout(PATIENCE).unwrap();

        assert_eq!(input.send_timeout(2.0, BLOCKED), Err(ExchangeError::TimedOut(BLOCKED)));

        output.recv_timeout(PATIENCE).unwrap();
        input.send_timeout(2.0, PATIENCE).unwrap();

        cancel.cancel();
        assert_eq!(handle.join().unwrap().broadcasts(), 1);
    }

    #[test]
    fn test_cancel_cuts_broadcast_short() {
        let cancel = CancelSignal::new();
        let (input, output) = (Port::new(), Port::new());
        let handle =
            spawn_unit(Axon::new(4, input.clone(), output.clone()).unwrap(), &cancel).unwrap();

        input.send_timeout(5.0, PATIENCE).unwrap();
        output.recv_timeout(PATIENCE).unwrap();

        cancel.cancel();
        let axon = handle.join().unwrap();
        assert_eq!(axon.delivered(), 1);
        assert_eq!(axon.broadcasts(), 0);
        assert_eq!(output.recv_timeout(BLOCKED), Err(ExchangeError::TimedOut(BLOCKED)));
    }
}
