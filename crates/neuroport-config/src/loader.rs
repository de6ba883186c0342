// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are layered in three tiers, later tiers winning:
//! 1. TOML file (or built-in defaults when no file exists)
//! 2. Environment variables
//! 3. CLI arguments

use crate::{ActivationKind, ConfigError, ConfigResult, NeuroportConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "neuroport.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "NEUROPORT_CONFIG_PATH";

/// Find the neuroport configuration file
///
/// Search order:
/// 1. `NEUROPORT_CONFIG_PATH` environment variable
/// 2. Current working directory: `./neuroport.toml`
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(
            cwd.ancestors()
                .skip(1)
                .take(5)
                .map(|dir| dir.join(CONFIG_FILE_NAME)),
        );
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Validation is a separate step (see [`crate::validate_config`]).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroportConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let config: NeuroportConfig = toml::from_str(&content)?;

    Ok(with_overrides(config, cli_args))
}

/// Like [`load_config`], but a missing file (when no explicit path was
/// given) falls back to built-in defaults instead of failing.
///
/// An explicit path that does not exist is still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeuroportConfig> {
    if config_path.is_some() {
        return load_config(config_path, cli_args);
    }
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) if env::var_os(CONFIG_PATH_ENV).is_none() => {
            Ok(with_overrides(NeuroportConfig::default(), cli_args))
        }
        Err(err) => Err(err),
    }
}

fn with_overrides(
    mut config: NeuroportConfig,
    cli_args: Option<&HashMap<String, String>>,
) -> NeuroportConfig {
    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }
    config
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NEUROPORT_LEARNRATE` -> `neuron.learnrate`
/// - `NEUROPORT_ACTIVATION` -> `neuron.activation`
/// - `NEUROPORT_INITIAL_WEIGHT` -> `synapse.initial_weight`
/// - `NEUROPORT_CYCLES` -> `training.cycles`
/// - `NEUROPORT_SEED` -> `training.seed`
/// - `NEUROPORT_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut NeuroportConfig) {
    if let Ok(value) = env::var("NEUROPORT_LEARNRATE") {
        if let Ok(learnrate) = value.parse::<f64>() {
            config.neuron.learnrate = learnrate;
        }
    }
    if let Ok(value) = env::var("NEUROPORT_ACTIVATION") {
        if let Ok(activation) = value.parse::<ActivationKind>() {
            config.neuron.activation = activation;
        }
    }
    if let Ok(value) = env::var("NEUROPORT_INITIAL_WEIGHT") {
        if let Ok(weight) = value.parse::<f64>() {
            config.synapse.initial_weight = weight;
        }
    }
    if let Ok(value) = env::var("NEUROPORT_CYCLES") {
        if let Ok(cycles) = value.parse::<u64>() {
            config.training.cycles = cycles;
        }
    }
    if let Ok(value) = env::var("NEUROPORT_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.training.seed = seed;
        }
    }
    if let Ok(value) = env::var("NEUROPORT_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"learnrate": "0.05", "cycles": "200"}`)
pub fn apply_cli_overrides(config: &mut NeuroportConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("learnrate") {
        if let Ok(learnrate) = value.parse::<f64>() {
            config.neuron.learnrate = learnrate;
        }
    }
    if let Some(value) = cli_args.get("activation") {
        if let Ok(activation) = value.parse::<ActivationKind>() {
            config.neuron.activation = activation;
        }
    }
    if let Some(value) = cli_args.get("initial_weight") {
        if let Ok(weight) = value.parse::<f64>() {
            config.synapse.initial_weight = weight;
        }
    }
    if let Some(value) = cli_args.get("cycles") {
        if let Ok(cycles) = value.parse::<u64>() {
            config.training.cycles = cycles;
        }
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.training.seed = seed;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("verbose_units") {
        config.logging.verbose_units = parse_flag(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogFormat, SampleConfig};
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 6] = [
        "NEUROPORT_LEARNRATE",
        "NEUROPORT_ACTIVATION",
        "NEUROPORT_INITIAL_WEIGHT",
        "NEUROPORT_CYCLES",
        "NEUROPORT_SEED",
        "NEUROPORT_LOG_LEVEL",
    ];

    fn clear_override_vars() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        File::create(&config_path).unwrap();

        env::set_var(CONFIG_PATH_ENV, config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();

        env::set_var(CONFIG_PATH_ENV, dir.path().join("absent.toml"));
        let result = find_config_file();
        let fallback = load_config_or_default(None, None);
        env::remove_var(CONFIG_PATH_ENV);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
        // An explicitly named file is never silently replaced by defaults
        assert!(matches!(fallback, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_partial_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[neuron]").unwrap();
        writeln!(file, "learnrate = 0.25").unwrap();
        writeln!(file, "activation = \"tanh\"").unwrap();
        writeln!(file, "[training]").unwrap();
        writeln!(file, "samples = [{{ input = 1.0, expect = 2.0 }}]").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "format = \"json\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.neuron.learnrate, 0.25);
        assert_eq!(config.neuron.activation, ActivationKind::Tanh);
        assert_eq!(config.neuron.ingoing, 1);
        assert_eq!(config.synapse.initial_weight, 0.75);
        assert_eq!(config.training.cycles, 1000);
        assert_eq!(
            config.training.samples,
            vec![SampleConfig {
                input: 1.0,
                expect: 2.0
            }]
        );
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[neuron\nlearnrate = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_activation_is_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[neuron]\nactivation = \"relu\"\n").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeuroportConfig::default();

        env::set_var("NEUROPORT_LEARNRATE", "0.05");
        env::set_var("NEUROPORT_ACTIVATION", "Square");
        env::set_var("NEUROPORT_CYCLES", "not-a-number");
        env::set_var("NEUROPORT_SEED", "42");
        env::set_var("NEUROPORT_INITIAL_WEIGHT", "-0.25");
        env::set_var("NEUROPORT_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.neuron.learnrate, 0.05);
        assert_eq!(config.neuron.activation, ActivationKind::Square);
        // Unparseable values leave the previous setting in place
        assert_eq!(config.training.cycles, 1000);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.synapse.initial_weight, -0.25);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparseable_initial_weight_ignored() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = NeuroportConfig::default();

        env::set_var("NEUROPORT_INITIAL_WEIGHT", "heavy");
        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.synapse.initial_weight, 0.75);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = NeuroportConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("initial_weight".to_string(), "0.5".to_string());
        cli_args.insert("cycles".to_string(), "200".to_string());
        cli_args.insert("verbose_units".to_string(), "yes".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.synapse.initial_weight, 0.5);
        assert_eq!(config.training.cycles, 200);
        assert!(config.logging.verbose_units);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[training]").unwrap();
        writeln!(file, "cycles = 10").unwrap();
        writeln!(file, "seed = 1").unwrap();

        env::set_var("NEUROPORT_CYCLES", "20");
        env::set_var("NEUROPORT_SEED", "2");

        let mut cli_args = HashMap::new();
        cli_args.insert("cycles".to_string(), "30".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_override_vars();

        // CLI wins for cycles, env wins for seed (no CLI override)
        assert_eq!(config.training.cycles, 30);
        assert_eq!(config.training.seed, 2);
    }
}
