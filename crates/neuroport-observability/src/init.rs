// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Build the `EnvFilter` for the given flags and configuration
///
/// Debug flags take precedence over the configured level for the crates
/// they name.
pub fn build_filter(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = debug_flags.to_filter_string(&config.level);
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

fn console_layer(config: &LoggingConfig, filter: EnvFilter) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_file(false)
        .with_line_number(false);

    // Stdout is left to the tools for their results
    match config.format {
        LogFormat::Text => base.with_writer(std::io::stderr).with_filter(filter).boxed(),
        LogFormat::Json => base
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

/// Install the global tracing subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `config` - Level and format for everything else
///
/// # Errors
/// Fails if the level is not a valid filter directive or a global subscriber
/// is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(debug_flags, config)?;
    Registry::default()
        .with(console_layer(config, filter))
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!(
        target: "neuroport-observability",
        level = %config.level,
        format = ?config.format,
        debug_crates = debug_flags.enabled_crates.len(),
        "logging initialized"
    );
    Ok(())
}
