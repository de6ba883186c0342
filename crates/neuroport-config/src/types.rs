// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `neuroport.toml`. Every section has
//! defaults, so a partial (or empty) file is valid input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuroportConfig {
    pub neuron: NeuronConfig,
    pub synapse: SynapseConfig,
    pub training: TrainingConfig,
    pub logging: LoggingConfig,
}

/// Activation function selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    Identity,
    #[default]
    Sigmoid,
    Tanh,
    Square,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 4] = [
        ActivationKind::Identity,
        ActivationKind::Sigmoid,
        ActivationKind::Tanh,
        ActivationKind::Square,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivationKind::Identity => "identity",
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::Tanh => "tanh",
            ActivationKind::Square => "square",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| format!("unknown activation '{}'", s))
    }
}

/// Neuron construction parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    pub learnrate: f64,
    pub activation: ActivationKind,
    pub ingoing: usize,
    pub outgoing: usize,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            learnrate: 0.1,
            activation: ActivationKind::Sigmoid,
            ingoing: 1,
            outgoing: 1,
        }
    }
}

/// Weighted edge parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapseConfig {
    pub initial_weight: f64,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            initial_weight: 0.75,
        }
    }
}

/// One training sample: input value and the output it should produce
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SampleConfig {
    pub input: f64,
    pub expect: f64,
}

/// Training run parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub cycles: u64,
    pub seed: u64,
    /// Longest a single exchange may wait before the run is reported stalled
    pub exchange_timeout_ms: u64,
    pub samples: Vec<SampleConfig>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            cycles: 1000,
            seed: 0,
            exchange_timeout_ms: 2000,
            samples: vec![
                SampleConfig {
                    input: 1.0,
                    expect: 1.0,
                },
                SampleConfig {
                    input: 0.0,
                    expect: 0.0,
                },
            ],
        }
    }
}

/// Logging output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    pub format: LogFormat,
    /// Per-exchange events from every unit
    pub verbose_units: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            verbose_units: false,
        }
    }
}
