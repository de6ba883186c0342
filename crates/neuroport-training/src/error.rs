// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use neuroport_units::{ExchangeError, UnitError};
use std::time::Duration;
use thiserror::Error;

/// Training run failures
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("a regimen needs at least one sample")]
    EmptyRegimen,

    #[error("training stalled at '{stage}': no partner within {timeout:?}")]
    Stalled {
        stage: &'static str,
        timeout: Duration,
    },

    /// Several edges feeding one neuron would share its backward port, and
    /// which edge receives which margin/adjustment copy is unordered.
    #[error("the trainer drives exactly one input edge, got ingoing = {ingoing}")]
    SharedBackwardPort { ingoing: usize },

    #[error("invalid training parameter: {0}")]
    InvalidParameter(String),
}

impl TrainingError {
    /// Attribute a failed caller-side exchange to a stage of the cycle
    pub(crate) fn at_stage(err: ExchangeError, stage: &'static str) -> Self {
        match err {
            ExchangeError::TimedOut(timeout) => TrainingError::Stalled { stage, timeout },
            other => TrainingError::Exchange(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrainingError>;
