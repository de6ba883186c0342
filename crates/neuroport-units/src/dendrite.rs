// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dendrite: fan-in aggregator
//!
//! Receives exactly `count` values, then blocks until their sum is taken
//! downstream. The next receive is only attempted after that send completes,
//! so extra senders queue up on the input port instead of being counted.

use crate::cancel::CancelSignal;
use crate::error::{ExchangeError, Result};
use crate::fan::validate_count;
use crate::port::{Port, Signal};
use crate::unit::{Unit, LOG_TARGET};
use tracing::debug;

pub struct Dendrite {
    name: String,
    count: usize,
    input: Port,
    output: Port,
    sum: Signal,
    received: usize,
    emissions: u64,
    verbose: bool,
}

impl Dendrite {
    pub fn new(count: usize, input: Port, output: Port) -> Result<Self> {
        validate_count("dendrite", count)?;
        Ok(Self {
            name: "dendrite".to_string(),
            count,
            input,
            output,
            sum: 0.0,
            received: 0,
            emissions: 0,
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

    /// Values received since the last emitted sum. Left in place (never
    /// flushed) when the unit is cancelled mid-accumulation.
    pub fn pending(&self) -> usize {
        self.received
    }

    pub fn partial_sum(&self) -> Signal {
        self.sum
    }

    pub fn emissions(&self) -> u64 {
        self.emissions
    }
}

impl Unit for Dendrite {
    fn kind(&self) -> &'static str {
        "dendrite"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        let value = self.input.recv(cancel)?;
        self.sum += value;
        self.received += 1;

        if self.received < self.count {
            return Ok(());
        }

        self.output.send(self.sum, cancel)?;
        if self.verbose {
            debug!(target: LOG_TARGET, unit = %self.name, sum = self.sum, "dendrite emitted");
        }
        self.sum = 0.0;
        self.received = 0;
        self.emissions += 1;
        Ok(())
    }
}
