// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unit trait and thread runner
//!
//! Every unit runs on its own named thread and loops over `step()` until an
//! exchange fails. A step performs one protocol transition and blocks only
//! inside port exchanges. Joining a finished unit hands its final state back
//! to the caller, which is how tests inspect learned weights and phases.

use crate::cancel::CancelSignal;
use crate::error::{ExchangeError, Result, UnitError};
use crate::phase::Phase;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

pub(crate) const LOG_TARGET: &str = "neuroport-units";

/// A concurrently scheduled, message-passing unit
pub trait Unit: Send + 'static {
    /// Unit kind for logs ("dendrite", "axon", ...)
    fn kind(&self) -> &'static str;

    /// Instance name, also used as the thread name
    fn name(&self) -> &str;

    /// Perform one protocol transition, blocking only on port exchanges
    fn step(&mut self, cancel: &CancelSignal) -> std::result::Result<(), ExchangeError>;

    /// Current phase for units that alternate forward and backward
    fn phase(&self) -> Option<Phase> {
        None
    }
}

/// Handle to a running unit
pub struct UnitHandle<U: Unit> {
    name: String,
    handle: JoinHandle<U>,
}

/// Start `unit` on a dedicated thread observing `cancel`
pub fn spawn_unit<U: Unit>(mut unit: U, cancel: &CancelSignal) -> Result<UnitHandle<U>> {
    let name = unit.name().to_string();
    let cancel = cancel.clone();

    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(move || {
            debug!(target: LOG_TARGET, unit = unit.name(), kind = unit.kind(), "unit started");
            loop {
                match unit.step(&cancel) {
                    Ok(()) => continue,
                    Err(ExchangeError::Cancelled) => {
                        debug!(
                            target: LOG_TARGET,
                            unit = unit.name(),
                            phase = ?unit.phase(),
                            "unit cancelled"
                        );
                        break;
                    }
                    Err(err) => {
                        warn!(
                            target: LOG_TARGET,
                            unit = unit.name(),
                            phase = ?unit.phase(),
                            error = %err,
                            "unit stopped"
                        );
                        break;
                    }
                }
            }
            unit
        })
        .map_err(|source| UnitError::Spawn {
            name: name.clone(),
            source,
        })?;

    Ok(UnitHandle { name, handle })
}

impl<U: Unit> UnitHandle<U> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the unit to exit and take back its final state.
    ///
    /// Units only exit after the cancellation signal is raised, so this blocks
    /// until then.
    pub fn join(self) -> Result<U> {
        let name = self.name;
        self.handle.join().map_err(|_| UnitError::Panicked { name })
    }
}
