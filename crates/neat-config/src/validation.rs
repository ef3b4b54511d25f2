// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Problems are collected rather than reported one at a time, so a broken
//! configuration is diagnosed in full by a single startup attempt.

use crate::{ConfigError, ConfigResult, ParamType};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidType { field: String, expected: ParamType, found: String },
    InvalidValue { field: String, reason: String },
    UnknownItem { field: String },
    UnknownFunction { field: String, name: String },
}

impl ConfigValidationError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidType {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Invalid type for {}: expected {}, found {}",
                    field, expected, found
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::UnknownItem { field } => {
                write!(f, "Unknown configuration item: {}", field)
            }
            Self::UnknownFunction { field, name } => {
                write!(f, "Invalid configuration value for {}: unknown function '{}'", field, name)
            }
        }
    }
}

/// Fold collected validation errors into a single result
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every error when `errors` is not empty
pub fn into_result(errors: Vec<ConfigValidationError>) -> ConfigResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}
