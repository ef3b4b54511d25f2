// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Resolved parameter store
//!
//! A [`ParameterSet`] is produced once from the raw `[genome]` table and the
//! declared parameters. After that it is read-only and every value has the
//! declared type.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::validation::{into_result, ConfigValidationError};
use crate::{ConfigError, ConfigParameter, ConfigResult, ParamType, ParamValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every declared parameter from `raw`
    ///
    /// Items in `raw` that no parameter declares are rejected, as are missing
    /// required parameters and values of the wrong type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` listing every problem found
    pub fn resolve(params: &[ConfigParameter], raw: &toml::Table) -> ConfigResult<Self> {
        let mut errors = Vec::new();
        let mut values = BTreeMap::new();

        for param in params {
            match param.parse(raw.get(&param.name)) {
                Ok(value) => {
                    values.insert(param.name.clone(), value);
                }
                Err(e) => errors.push(e),
            }
        }

        let declared: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
        for key in raw.keys() {
            if !declared.contains(key.as_str()) {
                errors.push(ConfigValidationError::UnknownItem { field: key.clone() });
            }
        }

        into_result(errors)?;

        debug!(
            target: "neat-config",
            "Resolved {} configuration parameters", values.len()
        );

        Ok(Self { values })
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn float(&self, name: &str) -> ConfigResult<f64> {
        match self.lookup(name)? {
            ParamValue::Float(v) => Ok(*v),
            other => Err(type_mismatch(name, ParamType::Float, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> ConfigResult<bool> {
        match self.lookup(name)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(type_mismatch(name, ParamType::Bool, other)),
        }
    }

    pub fn string(&self, name: &str) -> ConfigResult<&str> {
        match self.lookup(name)? {
            ParamValue::Str(v) => Ok(v.as_str()),
            other => Err(type_mismatch(name, ParamType::Str, other)),
        }
    }

    pub fn list(&self, name: &str) -> ConfigResult<&[String]> {
        match self.lookup(name)? {
            ParamValue::List(v) => Ok(v.as_slice()),
            other => Err(type_mismatch(name, ParamType::List, other)),
        }
    }

    fn lookup(&self, name: &str) -> ConfigResult<&ParamValue> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::MissingRequired(name.to_string()))
    }
}

fn type_mismatch(name: &str, expected: ParamType, found: &ParamValue) -> ConfigError {
    ConfigError::InvalidValue(format!(
        "{} is a {}, not a {}",
        name,
        found.param_type(),
        expected
    ))
}
