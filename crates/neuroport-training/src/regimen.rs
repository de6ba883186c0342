// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Training samples

use crate::error::{Result, TrainingError};
use neuroport_config::SampleConfig;
use neuroport_units::Signal;
use serde::{Deserialize, Serialize};

/// An input value and the output the network should produce for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input: Signal,
    pub expect: Signal,
}

impl TrainingSample {
    pub const fn new(input: Signal, expect: Signal) -> Self {
        Self { input, expect }
    }
}

impl From<SampleConfig> for TrainingSample {
    fn from(sample: SampleConfig) -> Self {
        Self::new(sample.input, sample.expect)
    }
}

/// A non-empty set of samples to draw from
#[derive(Debug, Clone, PartialEq)]
pub struct Regimen {
    samples: Vec<TrainingSample>,
}

impl Regimen {
    pub fn new(samples: Vec<TrainingSample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(TrainingError::EmptyRegimen);
        }
        Ok(Self { samples })
    }

    /// Learn to reproduce the input: `1 -> 1`, `0 -> 0`
    pub fn identity() -> Self {
        Self {
            samples: vec![TrainingSample::new(1.0, 1.0), TrainingSample::new(0.0, 0.0)],
        }
    }

    pub fn from_config(samples: &[SampleConfig]) -> Result<Self> {
        Self::new(samples.iter().copied().map(TrainingSample::from).collect())
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// A constructed regimen is never empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for Regimen {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_regimen_rejected() {
        assert!(matches!(Regimen::new(Vec::new()), Err(TrainingError::EmptyRegimen)));
        assert!(matches!(Regimen::from_config(&[]), Err(TrainingError::EmptyRegimen)));
    }

    #[test]
    fn test_identity_regimen() {
        let regimen = Regimen::identity();
        assert_eq!(regimen.len(), 2);
        assert!(!regimen.is_empty());
        assert_eq!(regimen.samples()[0], TrainingSample::new(1.0, 1.0));
        assert_eq!(regimen.samples()[1], TrainingSample::new(0.0, 0.0));
    }

    #[test]
    fn test_from_config_keeps_order() {
        let samples = [
            SampleConfig { input: 0.5, expect: 1.0 },
            SampleConfig { input: 2.0, expect: 4.0 },
        ];
        let regimen = Regimen::from_config(&samples).unwrap();
        assert_eq!(regimen.samples()[1], TrainingSample::new(2.0, 4.0));
    }
}
