// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fan-in / fan-out widths of a neuron

use crate::error::{Result, UnitError};

/// Number of upstream edges feeding a neuron and downstream edges it serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FanSpec {
    ingoing: usize,
    outgoing: usize,
}

impl FanSpec {
    /// One edge in, one edge out
    pub const PASS_THROUGH: FanSpec = FanSpec {
        ingoing: 1,
        outgoing: 1,
    };

    pub fn new(ingoing: usize, outgoing: usize) -> Result<Self> {
        validate_count("ingoing", ingoing)?;
        validate_count("outgoing", outgoing)?;
        Ok(Self { ingoing, outgoing })
    }

    pub fn ingoing(&self) -> usize {
        self.ingoing
    }

    pub fn outgoing(&self) -> usize {
        self.outgoing
    }
}

impl Default for FanSpec {
    fn default() -> Self {
        Self::PASS_THROUGH
    }
}

pub(crate) fn validate_count(role: &'static str, count: usize) -> Result<()> {
    if count == 0 {
        return Err(UnitError::InvalidFan { role, count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts_rejected() {
        assert!(matches!(
            FanSpec::new(0, 1),
            Err(UnitError::InvalidFan { role: "ingoing", count: 0 })
        ));
        assert!(matches!(
            FanSpec::new(2, 0),
            Err(UnitError::InvalidFan { role: "outgoing", .. })
        ));
    }

    #[test]
    fn test_pass_through() {
        let fan = FanSpec::new(1, 1).unwrap();
        assert_eq!(fan, FanSpec::PASS_THROUGH);
        assert_eq!(fan.ingoing(), 1);
        assert_eq!(fan.outgoing(), 1);
    }
}
