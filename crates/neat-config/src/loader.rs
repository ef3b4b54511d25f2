// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Loading `neat_configuration.toml`
//!
//! Gene parameters live in the `[genome]` table. A value from the file is
//! replaced by `NEAT_GENOME_<PARAM>` from the environment, and both are
//! replaced by a parameter passed explicitly by the caller (usually parsed
//! from the command line). Overrides arrive as strings; typing happens when
//! the parameters are resolved.

use crate::{ConfigError, ConfigResult, NeatConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "neat_configuration.toml";

/// Prefix of environment variables overriding `[genome]` parameters
pub const GENOME_ENV_PREFIX: &str = "NEAT_GENOME_";

/// Locate `neat_configuration.toml`
///
/// `NEAT_CONFIG_PATH` wins when set; otherwise the working directory and up
/// to five of its ancestors are searched, nearest first.
///
/// # Errors
///
/// `ConfigError::FileNotFound` naming every path tried
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NEAT_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by NEAT_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in:\n{}\n(set NEAT_CONFIG_PATH to point at another file)",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Read the configuration file at `config_path` (or the one found by
/// [`find_config_file`]) and apply environment, then `cli_args`, overrides
/// to its `[genome]` table
///
/// # Errors
///
/// Missing file, unreadable file or invalid TOML. Individual parameters are
/// checked later, when they are resolved.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<NeatConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: NeatConfig = toml::from_str(&content)?;

    info!(
        target: "neat-config",
        "Loaded configuration from {}", config_file.display()
    );

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Copy every `NEAT_GENOME_<PARAM>` variable into `genome.<param>`
///
/// `NEAT_GENOME_WEIGHT_MUTATE_RATE=0.5` becomes `weight_mutate_rate = "0.5"`.
pub fn apply_environment_overrides(config: &mut NeatConfig) {
    for (key, value) in env::vars() {
        if let Some(param) = key.strip_prefix(GENOME_ENV_PREFIX) {
            if param.is_empty() {
                continue;
            }
            let param = param.to_lowercase();
            debug!(target: "neat-config", "Environment override: {} = {}", param, value);
            config.genome.insert(param, toml::Value::String(value));
        }
    }
}

/// Set genome parameters given by name, e.g. `{"weight_mutate_rate": "0.5"}`
pub fn apply_cli_overrides(config: &mut NeatConfig, cli_args: &HashMap<String, String>) {
    for (param, value) in cli_args {
        debug!(target: "neat-config", "CLI override: {} = {}", param, value);
        config
            .genome
            .insert(param.clone(), toml::Value::String(value.clone()));
    }
}
