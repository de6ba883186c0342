// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-neuroport-units` to turn on debug logging for
//! one crate while the rest stay at the configured level.

use std::collections::HashMap;
use std::env;

use tracing::Level;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (comma-separated, or `all`)
pub const DEBUG_ENV: &str = "NEUROPORT_DEBUG";

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use neuroport_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-neuroport-units".to_string()]);
/// assert!(flags.is_enabled("neuroport-units"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    /// Enabled crates and the level each one logs at
    pub enabled_crates: HashMap<String, Level>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`.
    /// `--debug-all` enables every known crate.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Merge a `NEUROPORT_DEBUG`-style value: `all` or comma-separated crate names
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    /// Enable debug logging for a crate, keeping a finer level if already set
    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates
            .entry(crate_name.to_string())
            .or_insert(Level::DEBUG);
    }

    /// Enable trace logging for a crate, which includes per-exchange events
    pub fn enable_trace(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), Level::TRACE);
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Level a crate logs at, if it has a flag
    pub fn level(&self, crate_name: &str) -> Option<Level> {
        self.enabled_crates.get(crate_name).copied()
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Build an `EnvFilter` directive string from the flags
    ///
    /// Each enabled crate gets its level under both its hyphenated log target
    /// and its module path; everything else logs at `default_level`.
    /// Format: `"neuroport-units=debug,neuroport_units=debug,info"`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut crates: Vec<(&String, &Level)> = self.enabled_crates.iter().collect();
        crates.sort_by(|a, b| a.0.cmp(b.0));

        let mut filters = Vec::with_capacity(crates.len() * 2 + 1);
        for (crate_name, level) in crates {
            let level = level.to_string().to_lowercase();
            filters.push(format!("{}={}", crate_name, level));
            let module_path = crate_name.replace('-', "_");
            if module_path != *crate_name {
                filters.push(format!("{}={}", module_path, level));
            }
        }
        filters.push(default_level.to_lowercase());
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and `NEUROPORT_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  {env}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {env}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        env = DEBUG_ENV
    )
}
