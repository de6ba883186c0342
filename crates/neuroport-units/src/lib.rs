// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroport Units
//!
//! A trainable neuron built from concurrently running, message-passing units:
//! - **Dendrite**: sums a fixed number of inputs into one value
//! - **Axon**: relays one value to a fixed number of receivers
//! - **Nucleus**: activation forward, margin + adjustment backward
//! - **Synapse**: weighted edge that learns from the adjustment it receives
//! - **Neuron**: one Nucleus wired between two Dendrites and two Axons
//!
//! ## Design Principles
//! - **Rendezvous only**: every exchange is an unbuffered [`Port`] handoff
//! - **No shared state**: weights and caches live inside their owning unit
//! - **One thread per unit**: a unit blocks only inside port exchanges
//! - **Cooperative shutdown**: a [`CancelSignal`] unblocks every pending
//!   exchange; no abort message is sent to partners mid-handshake
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroport_units::{ActivationPair, CancelSignal, FanSpec, Neuron, NeuronSpec, PortSet};
//! use std::time::Duration;
//!
//! let ports = PortSet::new();
//! let cancel = CancelSignal::new();
//! let spec = NeuronSpec::new(FanSpec::PASS_THROUGH, 0.1, ActivationPair::sigmoid());
//! let neuron = Neuron::spawn(spec, &ports, &cancel)?;
//!
//! ports.input.send_timeout(1.0, Duration::from_secs(1))?;
//! let activated = ports.output.recv_timeout(Duration::from_secs(1))?;
//! assert!((activated - 0.7310585786300049).abs() < 1e-12);
//!
//! cancel.cancel();
//! neuron.join()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod activation;
pub mod axon;
pub mod cancel;
pub mod dendrite;
pub mod error;
pub mod fan;
pub mod neuron;
pub mod nucleus;
pub mod phase;
pub mod port;
pub mod synapse;
pub mod unit;

pub use activation::ActivationPair;
pub use axon::Axon;
pub use cancel::CancelSignal;
pub use dendrite::Dendrite;
pub use error::{ExchangeError, Result, UnitError};
pub use fan::FanSpec;
pub use neuron::{Neuron, NeuronReport, NeuronSpec};
pub use nucleus::Nucleus;
pub use phase::Phase;
pub use port::{Port, PortSet, Signal};
pub use synapse::Synapse;
pub use unit::{spawn_unit, Unit, UnitHandle};
