// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # NEAT Configuration System
//!
//! Type-safe configuration layer for the NEAT genotype crates:
//! - Parameter declarations (`name`, expected type, optional default)
//! - TOML file parsing with automatic file discovery
//! - Environment variable and CLI argument overrides
//! - Aggregated validation errors, reported once at startup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neat_config::{load_config, ConfigParameter, ParamType, ParameterSet};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! let params = vec![ConfigParameter::required("weight_mutate_rate", ParamType::Float)];
//! let resolved = ParameterSet::resolve(&params, &config.genome).expect("Invalid genome section");
//! println!("weight_mutate_rate = {}", resolved.float("weight_mutate_rate").unwrap());
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod params;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use params::ParameterSet;
pub use types::*;
pub use validation::{into_result, ConfigValidationError};

/// Re-export for convenience
pub use toml;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
