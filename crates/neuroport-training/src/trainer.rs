// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Single-neuron training run
//!
//! ```text
//!   SampleDriver ──input──▶ Synapse ──▶ Neuron{1, outgoing} ──output──▶ Evaluator
//!   SampleDriver ◀─feedback─ Synapse ◀── Neuron              ◀──margin── Evaluator
//! ```
//!
//! The driver and evaluator run on the calling thread and bound every
//! exchange with the configured timeout; the synapse and the neuron's units
//! run on their own threads until the run ends.

use crate::driver::SampleDriver;
use crate::error::{Result, TrainingError};
use crate::evaluator::Evaluator;
use crate::regimen::Regimen;
use neuroport_config::{ActivationKind, NeuroportConfig};
use neuroport_units::{
    spawn_unit, ActivationPair, CancelSignal, FanSpec, Neuron, NeuronSpec, Port, PortSet, Synapse,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

const LOG_TARGET: &str = "neuroport-training";

/// Map a configured activation onto its function pair
pub fn activation_pair(kind: ActivationKind) -> ActivationPair {
    match kind {
        ActivationKind::Identity => ActivationPair::identity(),
        ActivationKind::Sigmoid => ActivationPair::sigmoid(),
        ActivationKind::Tanh => ActivationPair::tanh(),
        ActivationKind::Square => ActivationPair::square(),
    }
}

/// Parameters of one training run
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub fan: FanSpec,
    pub learnrate: f64,
    pub activation: ActivationPair,
    pub initial_weight: f64,
    pub regimen: Regimen,
    pub cycles: u64,
    pub seed: u64,
    pub exchange_timeout: Duration,
    pub verbose_units: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            fan: FanSpec::PASS_THROUGH,
            learnrate: 0.1,
            activation: ActivationPair::sigmoid(),
            initial_weight: 0.75,
            regimen: Regimen::identity(),
            cycles: 1000,
            seed: 0,
            exchange_timeout: Duration::from_millis(2000),
            verbose_units: false,
        }
    }
}

impl TrainerConfig {
    pub fn from_config(config: &NeuroportConfig) -> Result<Self> {
        Ok(Self {
            fan: FanSpec::new(config.neuron.ingoing, config.neuron.outgoing)?,
            learnrate: config.neuron.learnrate,
            activation: activation_pair(config.neuron.activation),
            initial_weight: config.synapse.initial_weight,
            regimen: Regimen::from_config(&config.training.samples)?,
            cycles: config.training.cycles,
            seed: config.training.seed,
            exchange_timeout: Duration::from_millis(config.training.exchange_timeout_ms),
            verbose_units: config.logging.verbose_units,
        })
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Completed forward/backward cycles
    pub cycles: u64,
    pub activation: &'static str,
    pub learnrate: f64,
    pub initial_weight: f64,
    pub final_weight: f64,
    pub last_margin: f64,
    pub mean_abs_margin: f64,
    /// Backward passes the nucleus finished; equals `cycles` on a clean run
    pub nucleus_cycles: u64,
    /// The run was stopped from outside before all cycles completed
    pub interrupted: bool,
    pub elapsed_ms: u64,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Result<Self> {
        if config.fan.ingoing() != 1 {
            return Err(TrainingError::SharedBackwardPort {
                ingoing: config.fan.ingoing(),
            });
        }
        if config.exchange_timeout.is_zero() {
            return Err(TrainingError::InvalidParameter(
                "exchange timeout must be non-zero".to_string(),
            ));
        }
        if !config.learnrate.is_finite() || !config.initial_weight.is_finite() {
            return Err(TrainingError::InvalidParameter(format!(
                "learnrate {} and initial weight {} must be finite",
                config.learnrate, config.initial_weight
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run every configured cycle
    pub fn run(&self) -> Result<TrainingReport> {
        self.run_with_signal(&CancelSignal::new())
    }

    /// Run until every cycle completes or `cancel` is raised elsewhere.
    ///
    /// An outside cancellation ends the run early with `interrupted` set;
    /// it is not an error.
    pub fn run_with_signal(&self, cancel: &CancelSignal) -> Result<TrainingReport> {
        let config = &self.config;
        let started = Instant::now();

        let edge = PortSet::new();
        let neuron_ports = PortSet {
            input: edge.output.clone(),
            output: Port::new(),
            upfeed: Port::new(),
            downfeed: edge.upfeed.clone(),
        };

        let synapse = Synapse::new(config.initial_weight, edge.clone())?
            .named("trainer.synapse")
            .verbose(config.verbose_units);
        let synapse = spawn_unit(synapse, cancel)?;
        let neuron = Neuron::spawn(
            NeuronSpec::new(config.fan, config.learnrate, config.activation.clone())
                .named("trainer.neuron")
                .verbose(config.verbose_units),
            &neuron_ports,
            cancel,
        );
        let neuron = match neuron {
            Ok(neuron) => neuron,
            Err(err) => {
                cancel.cancel();
                return Err(err.into());
            }
        };

        let mut driver = SampleDriver::new(
            config.regimen.clone(),
            config.seed,
            edge.input.clone(),
            edge.downfeed.clone(),
            config.exchange_timeout,
            cancel.clone(),
        );
        let mut evaluator = Evaluator::new(
            neuron_ports.output.clone(),
            neuron_ports.upfeed.clone(),
            config.fan.outgoing(),
            config.exchange_timeout,
            cancel.clone(),
        );

        info!(
            target: LOG_TARGET,
            cycles = config.cycles,
            seed = config.seed,
            activation = config.activation.name(),
            learnrate = config.learnrate,
            initial_weight = config.initial_weight,
            samples = config.regimen.len(),
            "training started"
        );

        let mut completed = 0;
        let outcome = self.drive(&mut driver, &mut evaluator, cancel, &mut completed);

        // False when someone else raised the signal first
        let interrupted = !cancel.cancel();
        let synapse = synapse.join()?;
        let neuron = neuron.join()?;

        match outcome {
            Ok(()) => {}
            Err(err) if interrupted => {
                debug!(target: LOG_TARGET, error = %err, "exchange abandoned after interrupt");
            }
            Err(err) => {
                warn!(target: LOG_TARGET, completed, error = %err, "training aborted");
                return Err(err);
            }
        }

        let report = TrainingReport {
            cycles: completed,
            activation: config.activation.name(),
            learnrate: config.learnrate,
            initial_weight: config.initial_weight,
            final_weight: synapse.weight(),
            last_margin: evaluator.last_margin(),
            mean_abs_margin: evaluator.mean_abs_margin(),
            nucleus_cycles: neuron.nucleus.cycles(),
            interrupted,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            target: LOG_TARGET,
            cycles = report.cycles,
            final_weight = report.final_weight,
            last_margin = report.last_margin,
            mean_abs_margin = report.mean_abs_margin,
            interrupted = report.interrupted,
            "training finished"
        );
        Ok(report)
    }

    fn drive(
        &self,
        driver: &mut SampleDriver,
        evaluator: &mut Evaluator,
        cancel: &CancelSignal,
        completed: &mut u64,
    ) -> Result<()> {
        let total = self.config.cycles;
        let progress_every = (total / 10).max(1);

        while *completed < total {
            if cancel.is_cancelled() {
                return Ok(());
            }
            let sample = driver.feed()?;
            let margin = evaluator.evaluate(sample.expect)?;
            let feedback = driver.absorb_feedback()?;
            *completed += 1;

            if self.config.verbose_units {
                trace!(
                    target: LOG_TARGET,
                    cycle = *completed,
                    input = sample.input,
                    expect = sample.expect,
                    margin,
                    feedback,
                    "cycle complete"
                );
            }
            if *completed % progress_every == 0 {
                debug!(
                    target: LOG_TARGET,
                    cycle = *completed,
                    total,
                    mean_abs_margin = evaluator.mean_abs_margin(),
                    "training progress"
                );
            }
        }

        if cancel.is_cancelled() {
            return Ok(());
        }
        driver.settle(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroport_config::SampleConfig;

    #[test]
    fn test_from_config_maps_every_section() {
        let mut config = NeuroportConfig::default();
        config.neuron.activation = ActivationKind::Tanh;
        config.neuron.outgoing = 3;
        config.synapse.initial_weight = 0.5;
        config.training.exchange_timeout_ms = 150;
        config.training.samples = vec![SampleConfig {
            input: 2.0,
            expect: 1.0,
        }];
        config.logging.verbose_units = true;

        let trainer_config = TrainerConfig::from_config(&config).unwrap();
        assert_eq!(trainer_config.activation.name(), "tanh");
        assert_eq!(trainer_config.fan.outgoing(), 3);
        assert_eq!(trainer_config.initial_weight, 0.5);
        assert_eq!(trainer_config.exchange_timeout, Duration::from_millis(150));
        assert_eq!(trainer_config.regimen.len(), 1);
        assert!(trainer_config.verbose_units);
    }

    #[test]
    fn test_from_config_rejects_empty_samples() {
        let mut config = NeuroportConfig::default();
        config.training.samples.clear();
        assert!(matches!(
            TrainerConfig::from_config(&config),
            Err(TrainingError::EmptyRegimen)
        ));
    }

    #[test]
    fn test_several_input_edges_rejected() {
        let config = TrainerConfig {
            fan: FanSpec::new(2, 1).unwrap(),
            ..TrainerConfig::default()
        };
        assert!(matches!(
            Trainer::new(config),
            Err(TrainingError::SharedBackwardPort { ingoing: 2 })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TrainerConfig {
            exchange_timeout: Duration::ZERO,
            ..TrainerConfig::default()
        };
        assert!(matches!(
            Trainer::new(config),
            Err(TrainingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_activation_mapping() {
        for kind in ActivationKind::ALL {
            assert_eq!(activation_pair(kind).name(), kind.as_str());
        }
    }
}
