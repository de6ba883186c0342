// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Train a single neuron and print the run report as JSON
//!
//! Usage:
//!   train_neuron [--config neuroport.toml] [--cycles N] [--learnrate X] [--seed N]
//!                [--activation sigmoid] [--verbose] [--debug-all | --debug-<crate>]

use anyhow::{Context, Result};
use clap::Parser;
use neuroport::config::{
    load_config_or_default, validate_config, ActivationKind, LogFormat, NeuroportConfig,
};
use neuroport::observability::{self, init_logging, CrateDebugFlags, DEBUG_ENV};
use neuroport::training::{Trainer, TrainerConfig};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Train one neuron behind one synapse on a sample regimen
#[derive(Parser, Debug)]
#[command(name = "train_neuron", version, long_about = None, after_help = observability::debug_flags_help())]
struct Args {
    /// Path to the configuration file (searched for when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of forward/backward cycles
    #[arg(long)]
    cycles: Option<u64>,

    /// Learning rate of the neuron
    #[arg(long)]
    learnrate: Option<f64>,

    /// Seed for sample selection
    #[arg(long)]
    seed: Option<u64>,

    /// Activation function (identity, sigmoid, tanh, square)
    #[arg(long)]
    activation: Option<ActivationKind>,

    /// Initial synapse weight
    #[arg(long)]
    initial_weight: Option<f64>,

    /// Log every exchange inside the units
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(cycles) = self.cycles {
            overrides.insert("cycles".to_string(), cycles.to_string());
        }
        if let Some(learnrate) = self.learnrate {
            overrides.insert("learnrate".to_string(), learnrate.to_string());
        }
        if let Some(seed) = self.seed {
            overrides.insert("seed".to_string(), seed.to_string());
        }
        if let Some(activation) = self.activation {
            overrides.insert("activation".to_string(), activation.as_str().to_string());
        }
        if let Some(weight) = self.initial_weight {
            overrides.insert("initial_weight".to_string(), weight.to_string());
        }
        if self.verbose {
            overrides.insert("verbose_units".to_string(), "true".to_string());
        }
        overrides
    }
}

/// Split `--debug-*` flags off before clap sees the arguments
fn split_debug_flags<I>(args: I) -> (Vec<String>, CrateDebugFlags)
where
    I: IntoIterator<Item = String>,
{
    let (debug, rest): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|arg| arg.starts_with("--debug-"));
    let mut flags = CrateDebugFlags::from_args(debug);
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    (rest, flags)
}

/// Parse the command line; `--verbose` raises the units and training crates to trace
fn parse_args<I>(args: I) -> Result<(Args, CrateDebugFlags), clap::Error>
where
    I: IntoIterator<Item = String>,
{
    let (clap_args, mut debug_flags) = split_debug_flags(args);
    let args = Args::try_parse_from(clap_args)?;
    if args.verbose {
        debug_flags.enable_trace("neuroport-units");
        debug_flags.enable_trace("neuroport-training");
    }
    Ok((args, debug_flags))
}

fn logging_config(config: &NeuroportConfig) -> observability::LoggingConfig {
    observability::LoggingConfig {
        level: config.logging.level.clone(),
        format: match config.logging.format {
            LogFormat::Text => observability::LogFormat::Text,
            LogFormat::Json => observability::LogFormat::Json,
        },
    }
}

fn main() -> Result<()> {
    let (args, debug_flags) = parse_args(env::args()).unwrap_or_else(|err| err.exit());

    let config = load_config_or_default(args.config.as_deref(), Some(&args.overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    init_logging(&debug_flags, &logging_config(&config)).context("Failed to initialize logging")?;
    info!(
        target: "neuroport-training",
        version = neuroport::config::VERSION,
        config = ?args.config,
        "train_neuron starting"
    );

    let trainer_config =
        TrainerConfig::from_config(&config).context("Failed to build trainer configuration")?;
    let trainer = Trainer::new(trainer_config).context("Failed to set up trainer")?;
    let report = trainer.run().context("Training run failed")?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
