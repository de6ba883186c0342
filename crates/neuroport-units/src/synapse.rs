// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synapse: weighted edge with a two-step backward handshake
//!
//! ## Cycle
//! 1. `AwaitingForward`: receive `v` on Input, send `v * weight` on Output,
//!    cache that output.
//! 2. `AwaitingBackwardStep1`: receive the margin on Upfeed, send
//!    `margin * weight` on Downfeed.
//! 3. `AwaitingBackwardStep2`: receive the adjustment on Upfeed and apply
//!    `weight += adjustment * cached_output`.
//!
//! Only the port belonging to the current phase is listened on, so a second
//! forward input waits until the backward handshake has finished.

use crate::cancel::CancelSignal;
use crate::error::{ExchangeError, Result, UnitError};
use crate::phase::Phase;
use crate::port::{PortSet, Signal};
use crate::unit::{Unit, LOG_TARGET};
use tracing::{debug, trace};

pub struct Synapse {
    name: String,
    weight: Signal,
    cached_output: Signal,
    ports: PortSet,
    phase: Phase,
    cycles: u64,
    verbose: bool,
}

impl Synapse {
    pub fn new(initial_weight: Signal, ports: PortSet) -> Result<Self> {
        if !initial_weight.is_finite() {
            return Err(UnitError::InvalidWeight(initial_weight));
        }
        Ok(Self {
            name: "synapse".to_string(),
            weight: initial_weight,
            cached_output: 0.0,
            ports,
            phase: Phase::AwaitingForward,
            cycles: 0,
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

    pub fn weight(&self) -> Signal {
        self.weight
    }

    pub fn cached_output(&self) -> Signal {
        self.cached_output
    }

    /// Completed forward + backward cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn forward(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        let value = self.ports.input.recv(cancel)?;
        let output = value * self.weight;
        self.cached_output = output;
        self.ports.output.send(output, cancel)?;
        if self.verbose {
            trace!(target: LOG_TARGET, unit = %self.name, input = value, output, "synapse forward");
        }
        self.phase = Phase::AwaitingBackwardStep1;
        Ok(())
    }

    fn relay_margin(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        let margin = self.ports.upfeed.recv(cancel)?;
        self.ports.downfeed.send(margin * self.weight, cancel)?;
        self.phase = Phase::AwaitingBackwardStep2;
        Ok(())
    }

    fn apply_adjustment(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        let adjustment = self.ports.upfeed.recv(cancel)?;
        let previous = self.weight;
        self.weight += adjustment * self.cached_output;
        if self.verbose {
            debug!(
                target: LOG_TARGET,
                unit = %self.name,
                previous,
                weight = self.weight,
                adjustment,
                "synapse weight updated"
            );
        }
        self.phase = Phase::AwaitingForward;
        self.cycles += 1;
        Ok(())
    }
}

impl Unit for Synapse {
    fn kind(&self) -> &'static str {
        "synapse"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        match self.phase {
            Phase::AwaitingForward => self.forward(cancel),
            Phase::AwaitingBackwardStep1 => self.relay_margin(cancel),
            Phase::AwaitingBackwardStep2 => self.apply_adjustment(cancel),
        }
    }

    fn phase(&self) -> Option<Phase> {
        Some(self.phase)
    }
}
