// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Forward/backward phase of a stateful unit

use std::fmt;

/// Which exchange a Synapse or Nucleus is armed for.
///
/// Exactly one phase is armed at a time, so forward input is never accepted
/// while a backward handshake is outstanding (and the reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Listening on Input only
    #[default]
    AwaitingForward,
    /// Listening on Upfeed for the error margin
    AwaitingBackwardStep1,
    /// Between the two backward messages (adjustment pending)
    AwaitingBackwardStep2,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::AwaitingForward => "awaiting-forward",
            Phase::AwaitingBackwardStep1 => "awaiting-backward-1",
            Phase::AwaitingBackwardStep2 => "awaiting-backward-2",
        };
        f.write_str(label)
    }
}
