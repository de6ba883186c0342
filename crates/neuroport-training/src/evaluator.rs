// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Downstream end of a training topology
//!
//! Stands in for every receiver of the trained neuron: it takes each output
//! copy and answers with `expected - result` on the upfeed.

use crate::error::{Result, TrainingError};
use neuroport_units::{CancelSignal, Port, Signal};
use std::time::Duration;

pub struct Evaluator {
    output: Port,
    upfeed: Port,
    receivers: usize,
    timeout: Duration,
    cancel: CancelSignal,
    last_margin: Signal,
    abs_margin_total: f64,
    evaluations: u64,
}

impl Evaluator {
    /// `receivers` must match the neuron's outgoing count
    pub fn new(
        output: Port,
        upfeed: Port,
        receivers: usize,
        timeout: Duration,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            output,
            upfeed,
            receivers,
            timeout,
            cancel,
            last_margin: 0.0,
            abs_margin_total: 0.0,
            evaluations: 0,
        }
    }

    /// Error for one result
    pub fn margin(result: Signal, expected: Signal) -> Signal {
        expected - result
    }

    /// Take every output copy and send back one margin per copy.
    ///
    /// Returns the margin of the last copy. All copies carry the same value.
    pub fn evaluate(&mut self, expected: Signal) -> Result<Signal> {
        let mut results = Vec::with_capacity(self.receivers);
        for _ in 0..self.receivers {
            let result = self
                .output
                .recv_bounded(self.timeout, &self.cancel)
                .map_err(|err| TrainingError::at_stage(err, "output"))?;
            results.push(result);
        }

        let mut margin = 0.0;
        for result in results {
            margin = Self::margin(result, expected);
            self.upfeed
                .send_bounded(margin, self.timeout, &self.cancel)
                .map_err(|err| TrainingError::at_stage(err, "margin"))?;
        }

        self.last_margin = margin;
        self.abs_margin_total += margin.abs();
        self.evaluations += 1;
        Ok(margin)
    }

    pub fn last_margin(&self) -> Signal {
        self.last_margin
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Mean absolute margin over all evaluations, 0 before the first
    pub fn mean_abs_margin(&self) -> f64 {
        if self.evaluations == 0 {
            return 0.0;
        }
        self.abs_margin_total / self.evaluations as f64
    }
}
