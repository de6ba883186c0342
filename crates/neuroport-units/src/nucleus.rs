// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Nucleus: activation unit
//!
//! Forward: cache the input as the excitement and emit `activation(x)`.
//! Backward: receive a margin, re-emit it unchanged on Downfeed, then emit
//! `learnrate * margin * derivative(excitement)` as a second message. The
//! margin is not scaled here; each upstream Synapse applies its own weight.

use crate::activation::ActivationPair;
use crate::cancel::CancelSignal;
use crate::error::{ExchangeError, Result, UnitError};
use crate::phase::Phase;
use crate::port::{PortSet, Signal};
use crate::unit::{Unit, LOG_TARGET};
use tracing::{debug, trace};

pub struct Nucleus {
    name: String,
    learnrate: f64,
    activation: ActivationPair,
    ports: PortSet,
    excitement: Signal,
    margin: Signal,
    phase: Phase,
    cycles: u64,
    verbose: bool,
}

impl Nucleus {
    pub fn new(learnrate: f64, activation: ActivationPair, ports: PortSet) -> Result<Self> {
        if !learnrate.is_finite() {
            return Err(UnitError::InvalidLearnrate(learnrate));
        }
        Ok(Self {
            name: "nucleus".to_string(),
            learnrate,
            activation,
            ports,
            excitement: 0.0,
            margin: 0.0,
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

    pub fn learnrate(&self) -> f64 {
        self.learnrate
    }

    /// Most recent forward input
    pub fn excitement(&self) -> Signal {
        self.excitement
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn adjustment(&self) -> Signal {
        self.learnrate * self.margin * self.activation.derive(self.excitement)
    }
}

impl Unit for Nucleus {
    fn kind(&self) -> &'static str {
        "nucleus"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError> {
        match self.phase {
            Phase::AwaitingForward => {
                let x = self.ports.input.recv(cancel)?;
                self.excitement = x;
                let activated = self.activation.activate(x);
                self.ports.output.send(activated, cancel)?;
                if self.verbose {
                    trace!(target: LOG_TARGET, unit = %self.name, excitement = x, activated, "nucleus fired");
                }
                self.phase = Phase::AwaitingBackwardStep1;
            }
            Phase::AwaitingBackwardStep1 => {
                self.margin = self.ports.upfeed.recv(cancel)?;
                self.ports.downfeed.send(self.margin, cancel)?;
                self.phase = Phase::AwaitingBackwardStep2;
            }
            Phase::AwaitingBackwardStep2 => {
                let adjustment = self.adjustment();
                self.ports.downfeed.send(adjustment, cancel)?;
                if self.verbose {
                    debug!(
                        target: LOG_TARGET,
                        unit = %self.name,
                        margin = self.margin,
                        adjustment,
                        "nucleus backward pass"
                    );
                }
                self.phase = Phase::AwaitingForward;
                self.cycles += 1;
            }
        }
        Ok(())
    }

    fn phase(&self) -> Option<Phase> {
        Some(self.phase)
    }
}
