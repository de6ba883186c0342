// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuroport Training
//!
//! Drives a single neuron through repeated forward/backward cycles:
//! - **SampleDriver**: seeded random sample selection, feeds the input edge
//! - **Evaluator**: answers each output with `expected - result`
//! - **Trainer**: wires driver, synapse, neuron and evaluator, runs, reports
//!
//! ```rust,no_run
//! use neuroport_training::{Trainer, TrainerConfig};
//!
//! let report = Trainer::new(TrainerConfig::default())?.run()?;
//! println!("learned weight {}", report.final_weight);
//! # Ok::<(), neuroport_training::TrainingError>(())
//! ```

pub mod driver;
pub mod error;
pub mod evaluator;
pub mod regimen;
pub mod trainer;

pub use driver::SampleDriver;
pub use error::{Result, TrainingError};
pub use evaluator::Evaluator;
pub use regimen::{Regimen, TrainingSample};
pub use trainer::{activation_pair, Trainer, TrainerConfig, TrainingReport};
