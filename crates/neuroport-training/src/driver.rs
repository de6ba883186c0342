// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Upstream end of a training topology
//!
//! The driver feeds sample inputs into the first edge and absorbs the margin
//! that edge relays further upstream, so the edge never blocks on a missing
//! receiver.

use crate::error::{Result, TrainingError};
use crate::regimen::{Regimen, TrainingSample};
use neuroport_units::{CancelSignal, Port, Signal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Picks samples uniformly at random from a seeded generator
pub struct SampleDriver {
    regimen: Regimen,
    rng: StdRng,
    input: Port,
    downfeed: Port,
    timeout: Duration,
    cancel: CancelSignal,
    fed: u64,
}

impl SampleDriver {
    /// `input` and `downfeed` are the first edge's input and downfeed ports.
    /// Every exchange gives up after `timeout`, or at once when `cancel` is raised.
    pub fn new(
        regimen: Regimen,
        seed: u64,
        input: Port,
        downfeed: Port,
        timeout: Duration,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            regimen,
            rng: StdRng::seed_from_u64(seed),
            input,
            downfeed,
            timeout,
            cancel,
            fed: 0,
        }
    }

    /// Next sample from the regimen; the same seed yields the same sequence
    pub fn draw(&mut self) -> TrainingSample {
        let index = self.rng.gen_range(0..self.regimen.len());
        self.regimen.samples()[index]
    }

    /// Draw a sample and hand its input to the edge
    pub fn feed(&mut self) -> Result<TrainingSample> {
        let sample = self.draw();
        self.input
            .send_bounded(sample.input, self.timeout, &self.cancel)
            .map_err(|err| TrainingError::at_stage(err, "input"))?;
        self.fed += 1;
        Ok(sample)
    }

    /// Take the margin the edge relays upstream after a backward pass
    pub fn absorb_feedback(&self) -> Result<Signal> {
        self.downfeed
            .recv_bounded(self.timeout, &self.cancel)
            .map_err(|err| TrainingError::at_stage(err, "feedback"))
    }

    /// Hand `value` to the edge without drawing a sample.
    ///
    /// The edge only accepts input once it is back in its forward phase, so a
    /// completed settle proves every earlier adjustment was applied.
    pub fn settle(&self, value: Signal) -> Result<()> {
        self.input
            .send_bounded(value, self.timeout, &self.cancel)
            .map_err(|err| TrainingError::at_stage(err, "settle"))
    }

    pub fn fed(&self) -> u64 {
        self.fed
    }
}
