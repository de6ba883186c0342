// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroport-observability
//!
//! Logging setup shared by neuroport binaries, with per-crate debug flags.
//!
//! ```rust,no_run
//! use neuroport_observability::{init_logging, parse_debug_flags, LoggingConfig};
//!
//! let flags = parse_debug_flags();
//! init_logging(&flags, &LoggingConfig::default()).expect("logging already initialized");
//! ```

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known neuroport crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neuroport-units",
    "neuroport-config",
    "neuroport-training",
    "neuroport-observability",
];
