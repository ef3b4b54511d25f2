// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Gene attributes.

An attribute descriptor owns everything about one named gene parameter: the
configuration parameters it needs (`<name>_<suffix>`), how a value is created
and mutated, and how two values are compared. Descriptors are immutable
`static` items shared by every gene of a variant.

| Kind | Value | Example |
|------|-------|---------|
| [`FloatAttribute`] | `f64` clamped to `[min, max]` | bias, response, weight |
| [`BoolAttribute`] | `bool` | enabled |
| [`FuncAttribute`] | registered function name | activation, aggregation |
*/

use std::fmt;

use neat_config::{ConfigParameter, ConfigValidationError};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GeneConfig;
use crate::types::{GeneError, GeneResult};

mod boolean;
mod float;
mod function;

pub use boolean::{BoolAttribute, BoolDefault};
pub use float::{FloatAttribute, InitType};
pub use function::FuncAttribute;

/// Shared reference to a static attribute descriptor
pub type AttributeRef = &'static (dyn Attribute + Send + Sync);

/// Kind of value an attribute holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Bool,
    Function,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Function => "function",
        };
        f.write_str(name)
    }
}

/// Current value of one attribute
///
/// Every variant owns its data, so `Clone` yields a fully independent value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Float(f64),
    Bool(bool),
    Function(String),
}

impl AttributeValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Float(_) => ValueKind::Float,
            AttributeValue::Bool(_) => ValueKind::Bool,
            AttributeValue::Function(_) => ValueKind::Function,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&str> {
        match self {
            AttributeValue::Function(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Bool(v) => write!(f, "{}", v),
            AttributeValue::Function(v) => write!(f, "{:?}", v),
        }
    }
}

/// Behaviour shared by every attribute kind
pub trait Attribute {
    /// Attribute name, also the prefix of its configuration parameters
    fn name(&self) -> &'static str;

    fn value_kind(&self) -> ValueKind;

    /// Parameters this attribute reads from the configuration
    fn config_params(&self) -> Vec<ConfigParameter>;

    /// Semantic checks on the resolved parameters, run once when the
    /// configuration is built
    fn validate(&self, config: &GeneConfig) -> Vec<ConfigValidationError>;

    fn init_value(&self, config: &GeneConfig, rng: &mut dyn RngCore) -> GeneResult<AttributeValue>;

    fn mutate_value(
        &self,
        value: &AttributeValue,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<AttributeValue>;

    /// Numeric distance between two values; `None` leaves the caller to
    /// apply the equality penalty (see [`attribute_distance`])
    fn distance(
        &self,
        _a: &AttributeValue,
        _b: &AttributeValue,
        _config: &GeneConfig,
    ) -> Option<f64> {
        None
    }

    /// Full configuration parameter name for `suffix`
    fn param_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.name(), suffix)
    }
}

/// Attribute distance with the equality fallback: 1.0 if the values differ
pub fn attribute_distance(
    attribute: &dyn Attribute,
    a: &AttributeValue,
    b: &AttributeValue,
    config: &GeneConfig,
) -> f64 {
    attribute
        .distance(a, b, config)
        .unwrap_or(if a == b { 0.0 } else { 1.0 })
}

/// Error for a value of the wrong kind handed to an attribute
pub(crate) fn wrong_kind(attribute: &dyn Attribute, found: &AttributeValue) -> GeneError {
    GeneError::ValueKind {
        attribute: attribute.name().to_string(),
        expected: attribute.value_kind(),
        found: found.kind(),
    }
}
