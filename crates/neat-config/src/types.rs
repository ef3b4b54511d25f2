// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Parameters are declared by the components that consume them (gene
//! attributes declare `<attribute>_<suffix>` names) and resolved from the
//! `[genome]` section of `neat_configuration.toml`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::validation::ConfigValidationError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NeatConfig {
    /// Raw gene parameters, resolved against declared [`ConfigParameter`]s
    pub genome: toml::Table,
}

/// Expected type of a configuration parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Float,
    Bool,
    Str,
    List,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Float => "float",
            ParamType::Bool => "bool",
            ParamType::Str => "str",
            ParamType::List => "list",
        };
        f.write_str(name)
    }
}

/// A resolved configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Bool(_) => ParamType::Bool,
            ParamValue::Str(_) => ParamType::Str,
            ParamValue::List(_) => ParamType::List,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Str(v) => write!(f, "{}", v),
            ParamValue::List(v) => write!(f, "{}", v.join(" ")),
        }
    }
}

/// Declaration of a single configuration parameter
///
/// This is the `(name, expected type, default)` triple published by every
/// component so the configuration can be checked before anything uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigParameter {
    pub name: String,
    pub value_type: ParamType,
    pub default: Option<ParamValue>,
}

impl ConfigParameter {
    pub fn new(
        name: impl Into<String>,
        value_type: ParamType,
        default: Option<ParamValue>,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            default,
        }
    }

    /// Parameter that must be present in the configuration
    pub fn required(name: impl Into<String>, value_type: ParamType) -> Self {
        Self::new(name, value_type, None)
    }

    /// Parameter that falls back to `default` when absent
    pub fn with_default(name: impl Into<String>, default: ParamValue) -> Self {
        let value_type = default.param_type();
        Self::new(name, value_type, Some(default))
    }

    /// Convert a raw TOML value into this parameter's type
    ///
    /// Strings are accepted for every type so that environment and CLI
    /// overrides can be applied uniformly.
    pub fn parse(&self, raw: Option<&toml::Value>) -> Result<ParamValue, ConfigValidationError> {
        let Some(raw) = raw else {
            return match &self.default {
                Some(default) => {
                    warn!(
                        target: "neat-config",
                        "Using default {} for '{}'", default, self.name
                    );
                    Ok(default.clone())
                }
                None => Err(ConfigValidationError::MissingRequired {
                    field: self.name.clone(),
                }),
            };
        };

        let parsed = match self.value_type {
            ParamType::Float => match raw {
                toml::Value::Float(v) => Some(ParamValue::Float(*v)),
                toml::Value::Integer(v) => Some(ParamValue::Float(*v as f64)),
                toml::Value::String(s) => s.trim().parse::<f64>().ok().map(ParamValue::Float),
                _ => None,
            },
            ParamType::Bool => match raw {
                toml::Value::Boolean(v) => Some(ParamValue::Bool(*v)),
                toml::Value::String(s) => parse_bool(s).map(ParamValue::Bool),
                _ => None,
            },
            ParamType::Str => match raw {
                toml::Value::String(s) => Some(ParamValue::Str(s.clone())),
                toml::Value::Boolean(v) => Some(ParamValue::Str(v.to_string())),
                toml::Value::Integer(v) => Some(ParamValue::Str(v.to_string())),
                toml::Value::Float(v) => Some(ParamValue::Str(v.to_string())),
                _ => None,
            },
            ParamType::List => match raw {
                toml::Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map(ParamValue::List),
                toml::Value::String(s) => Some(ParamValue::List(
                    s.split_whitespace().map(str::to_string).collect(),
                )),
                _ => None,
            },
        };

        parsed.ok_or_else(|| ConfigValidationError::InvalidType {
            field: self.name.clone(),
            expected: self.value_type,
            found: raw.to_string(),
        })
    }
}

/// Parse the boolean spellings accepted in configuration files
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
