// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron: a Nucleus wrapped in fan-in/fan-out units
//!
//! ```text
//!   external.input    ──▶ Dendrite(ingoing)  ──▶ internal.input    ──▶ ┐
//!   external.output   ◀── Axon(outgoing)     ◀── internal.output   ◀── │ Nucleus
//!   external.upfeed   ──▶ Dendrite(outgoing) ──▶ internal.upfeed   ──▶ │
//!   external.downfeed ◀── Axon(ingoing)      ◀── internal.downfeed ◀── ┘
//! ```
//!
//! The five units share one cancellation signal. From the outside the neuron
//! has the same four-port shape as a Synapse, so edges can be chained on
//! either side.

use crate::activation::ActivationPair;
use crate::axon::Axon;
use crate::cancel::CancelSignal;
use crate::dendrite::Dendrite;
use crate::error::Result;
use crate::fan::FanSpec;
use crate::nucleus::Nucleus;
use crate::port::PortSet;
use crate::unit::{spawn_unit, Unit, UnitHandle, LOG_TARGET};
use tracing::debug;

/// Construction parameters for a [`Neuron`]
#[derive(Debug, Clone)]
pub struct NeuronSpec {
    pub fan: FanSpec,
    pub learnrate: f64,
    pub activation: ActivationPair,
    pub label: String,
    pub verbose: bool,
}

impl NeuronSpec {
    pub fn new(fan: FanSpec, learnrate: f64, activation: ActivationPair) -> Self {
        Self {
            fan,
            learnrate,
            activation,
            label: "neuron".to_string(),
            verbose: false,
        }
    }

    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// A running neuron: handles to its five units
pub struct Neuron {
    label: String,
    fan: FanSpec,
    forward_dendrite: UnitHandle<Dendrite>,
    nucleus: UnitHandle<Nucleus>,
    forward_axon: UnitHandle<Axon>,
    backward_axon: UnitHandle<Axon>,
    backward_dendrite: UnitHandle<Dendrite>,
}

/// Final state of a neuron's units after shutdown
pub struct NeuronReport {
    pub forward_dendrite: Dendrite,
    pub nucleus: Nucleus,
    pub forward_axon: Axon,
    pub backward_axon: Axon,
    pub backward_dendrite: Dendrite,
}

impl Neuron {
    /// Wire and start the neuron's units against the `external` ports.
    ///
    /// All units are validated before any thread is started. If a thread
    /// fails to start, the units already running stay parked until the shared
    /// signal is raised.
    pub fn spawn(spec: NeuronSpec, external: &PortSet, cancel: &CancelSignal) -> Result<Self> {
        let NeuronSpec {
            fan,
            learnrate,
            activation,
            label,
            verbose,
        } = spec;
        let internal = PortSet::new();

        let forward_dendrite =
            Dendrite::new(fan.ingoing(), external.input.clone(), internal.input.clone())?
                .named(format!("{label}.dendrite.forward"))
                .verbose(verbose);
        let nucleus = Nucleus::new(learnrate, activation, internal.clone())?
            .named(format!("{label}.nucleus"))
            .verbose(verbose);
        let forward_axon =
            Axon::new(fan.outgoing(), internal.output.clone(), external.output.clone())?
                .named(format!("{label}.axon.forward"))
                .verbose(verbose);
        let backward_axon =
            Axon::new(fan.ingoing(), internal.downfeed.clone(), external.downfeed.clone())?
                .named(format!("{label}.axon.backward"))
                .verbose(verbose);
        let backward_dendrite =
            Dendrite::new(fan.outgoing(), external.upfeed.clone(), internal.upfeed.clone())?
                .named(format!("{label}.dendrite.backward"))
                .verbose(verbose);

        let neuron = Self {
            forward_dendrite: spawn_unit(forward_dendrite, cancel)?,
            nucleus: spawn_unit(nucleus, cancel)?,
            forward_axon: spawn_unit(forward_axon, cancel)?,
            backward_axon: spawn_unit(backward_axon, cancel)?,
            backward_dendrite: spawn_unit(backward_dendrite, cancel)?,
            label,
            fan,
        };

        debug!(
            target: LOG_TARGET,
            neuron = %neuron.label,
            ingoing = fan.ingoing(),
            outgoing = fan.outgoing(),
            learnrate,
            "neuron wired"
        );
        Ok(neuron)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fan(&self) -> FanSpec {
        self.fan
    }

    /// True once every unit has observed cancellation and exited
    pub fn is_finished(&self) -> bool {
        self.forward_dendrite.is_finished()
            && self.nucleus.is_finished()
            && self.forward_axon.is_finished()
            && self.backward_axon.is_finished()
            && self.backward_dendrite.is_finished()
    }

    /// Wait for all units to exit (after the shared signal is raised)
    pub fn join(self) -> Result<NeuronReport> {
        let report = NeuronReport {
            forward_dendrite: self.forward_dendrite.join()?,
            nucleus: self.nucleus.join()?,
            forward_axon: self.forward_axon.join()?,
            backward_axon: self.backward_axon.join()?,
            backward_dendrite: self.backward_dendrite.join()?,
        };
        debug!(
            target: LOG_TARGET,
            neuron = %self.label,
            cycles = report.nucleus.cycles(),
            phase = ?report.nucleus.phase(),
            "neuron stopped"
        );
        Ok(report)
    }
}
