// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every violation is collected and reported together, so a broken file can
//! be fixed in one pass.

use crate::{ConfigError, ConfigResult, NeuroportConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    ZeroCount { field: String },
    NonFinite { field: String, value: f64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCount { field } => write!(f, "{} must be at least 1", field),
            Self::NonFinite { field, value } => {
                write!(f, "{} must be a finite number, got {}", field, value)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation found
pub fn validate_config(config: &NeuroportConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// All violations in `config`, in section order
pub fn collect_errors(config: &NeuroportConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_neuron(config, &mut errors);
    validate_synapse(config, &mut errors);
    validate_training(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn require_finite(field: &str, value: f64, errors: &mut Vec<ConfigValidationError>) -> bool {
    if value.is_finite() {
        return true;
    }
    errors.push(ConfigValidationError::NonFinite {
        field: field.to_string(),
        value,
    });
    false
}

fn require_nonzero(field: &str, count: u64, errors: &mut Vec<ConfigValidationError>) {
    if count == 0 {
        errors.push(ConfigValidationError::ZeroCount {
            field: field.to_string(),
        });
    }
}

fn validate_neuron(config: &NeuroportConfig, errors: &mut Vec<ConfigValidationError>) {
    let neuron = &config.neuron;
    if require_finite("neuron.learnrate", neuron.learnrate, errors) && neuron.learnrate <= 0.0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "neuron.learnrate".to_string(),
            reason: format!("must be positive, got {}", neuron.learnrate),
        });
    }
    require_nonzero("neuron.ingoing", neuron.ingoing as u64, errors);
    require_nonzero("neuron.outgoing", neuron.outgoing as u64, errors);
}

fn validate_synapse(config: &NeuroportConfig, errors: &mut Vec<ConfigValidationError>) {
    require_finite("synapse.initial_weight", config.synapse.initial_weight, errors);
}

fn validate_training(config: &NeuroportConfig, errors: &mut Vec<ConfigValidationError>) {
    let training = &config.training;
    require_nonzero("training.cycles", training.cycles, errors);
    require_nonzero("training.exchange_timeout_ms", training.exchange_timeout_ms, errors);

    if training.samples.is_empty() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "training.samples".to_string(),
            reason: "at least one sample is required".to_string(),
        });
    }
    for (index, sample) in training.samples.iter().enumerate() {
        require_finite(&format!("training.samples[{index}].input"), sample.input, errors);
        require_finite(&format!("training.samples[{index}].expect"), sample.expect, errors);
    }
}

fn validate_logging(config: &NeuroportConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}
