// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroport
//!
//! A trainable neuron decomposed into concurrently running units that talk
//! only through unbuffered rendezvous ports. Forward signals and backward
//! error/adjustment messages travel over the same kind of port, and a learned
//! weight lives inside the synapse that owns it.
//!
//! ## Feature Flags
//!
//! - **`config`**: TOML configuration with environment and CLI overrides
//! - **`training`**: sample driver, evaluator and single-neuron training runs
//! - **`observability`**: logging initialization and per-crate debug flags
//! - **`cli`**: the `train_neuron` tool
//!
//! The unit protocol itself (`units`) is always available.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neuroport::prelude::*;
//! use std::time::Duration;
//!
//! let ports = PortSet::new();
//! let cancel = CancelSignal::new();
//! let neuron = Neuron::spawn(
//!     NeuronSpec::new(FanSpec::new(2, 1)?, 0.1, ActivationPair::tanh()),
//!     &ports,
//!     &cancel,
//! )?;
//!
//! ports.input.send_timeout(0.25, Duration::from_secs(1))?;
//! ports.input.send_timeout(0.50, Duration::from_secs(1))?;
//! let activated = ports.output.recv_timeout(Duration::from_secs(1))?;
//! println!("tanh(0.75) = {activated}");
//!
//! cancel.cancel();
//! neuron.join()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Units: neuroport-units                                 │
//! │  (Port, Dendrite, Axon, Nucleus, Synapse, Neuron)       │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Training: neuroport-training                           │
//! │  (SampleDriver, Evaluator, Trainer)                     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Infrastructure: neuroport-config, -observability       │
//! │  (TOML + overrides, tracing setup)                      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub use neuroport_units as units;

#[cfg(feature = "config")]
pub use neuroport_config as config;

#[cfg(feature = "training")]
pub use neuroport_training as training;

#[cfg(feature = "observability")]
pub use neuroport_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::units::{
        spawn_unit, ActivationPair, CancelSignal, ExchangeError, FanSpec, Neuron, NeuronSpec,
        Phase, Port, PortSet, Signal, Synapse, Unit, UnitError,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, ActivationKind, NeuroportConfig};

    #[cfg(feature = "training")]
    pub use crate::training::{Regimen, Trainer, TrainerConfig, TrainingReport, TrainingSample};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let spec = NeuronSpec::new(FanSpec::PASS_THROUGH, 0.1, ActivationPair::identity());
        assert_eq!(spec.fan, FanSpec::PASS_THROUGH);
    }
}
