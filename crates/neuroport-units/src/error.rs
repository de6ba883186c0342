// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for port exchanges and unit lifecycle

use std::time::Duration;
use thiserror::Error;

/// Outcome of a single send or receive that did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The cancellation signal was raised while the exchange was pending
    #[error("exchange abandoned: cancellation signal raised")]
    Cancelled,

    /// A timed exchange gave up waiting for a partner
    #[error("exchange timed out after {0:?}")]
    TimedOut(Duration),

    /// Every endpoint on the other side of the port was dropped
    #[error("port disconnected: no peer endpoint remains")]
    Disconnected,
}

/// Construction and lifecycle errors for units and neurons
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("{role} count must be at least 1 (got {count})")]
    InvalidFan { role: &'static str, count: usize },

    #[error("learnrate must be finite (got {0})")]
    InvalidLearnrate(f64),

    #[error("weight must be finite (got {0})")]
    InvalidWeight(f64),

    #[error("failed to spawn unit thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unit thread '{name}' panicked")]
    Panicked { name: String },
}

/// Result type for unit construction and lifecycle operations
pub type Result<T> = std::result::Result<T, UnitError>;
