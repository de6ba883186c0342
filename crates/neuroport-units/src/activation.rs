// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Activation functions paired with their derivatives

use std::fmt;
use std::sync::Arc;

type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// An activation function and its derivative, both pure
#[derive(Clone)]
pub struct ActivationPair {
    name: &'static str,
    function: ScalarFn,
    derivative: ScalarFn,
}

impl ActivationPair {
    pub fn new<F, D>(name: &'static str, function: F, derivative: D) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            name,
            function: Arc::new(function),
            derivative: Arc::new(derivative),
        }
    }

    pub fn identity() -> Self {
        Self::new("identity", |x| x, |_| 1.0)
    }

    /// Logistic sigmoid; derivative is `s(x) * (1 - s(x))`
    pub fn sigmoid() -> Self {
        Self::new("sigmoid", sigmoid, |x| {
            let s = sigmoid(x);
            s * (1.0 - s)
        })
    }

    pub fn tanh() -> Self {
        Self::new("tanh", f64::tanh, |x| {
            let t = x.tanh();
            1.0 - t * t
        })
    }

    pub fn square() -> Self {
        Self::new("square", |x| x * x, |x| 2.0 * x)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn activate(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    #[inline]
    pub fn derive(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}

impl fmt::Debug for ActivationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationPair")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
