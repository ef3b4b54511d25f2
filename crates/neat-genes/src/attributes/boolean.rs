// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Boolean attribute with polarity-dependent flip rates

use neat_config::{parse_bool, ConfigParameter, ConfigValidationError, ParamType, ParamValue};
use rand::{Rng, RngCore};

use super::{wrong_kind, Attribute, AttributeValue, ValueKind};
use crate::config::GeneConfig;
use crate::types::GeneResult;

/// How `<name>_default` selects an initial value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoolDefault {
    Fixed(bool),
    /// True with the given probability (`random`/`none` mean 0.5)
    Probability(f64),
}

impl BoolDefault {
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(fixed) = parse_bool(value) {
            return Some(BoolDefault::Fixed(fixed));
        }
        match value.trim().to_lowercase().as_str() {
            "random" | "none" => Some(BoolDefault::Probability(0.5)),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|p| (0.0..=1.0).contains(p))
                .map(BoolDefault::Probability),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoolAttribute {
    name: &'static str,
}

impl BoolAttribute {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn default_rule(&self, config: &GeneConfig) -> GeneResult<BoolDefault> {
        let name = self.param_name("default");
        let raw = config.params().string(&name)?;
        BoolDefault::parse(raw).ok_or_else(|| {
            neat_config::ConfigError::InvalidValue(format!("{}: unknown default '{}'", name, raw))
                .into()
        })
    }
}

impl Attribute for BoolAttribute {
    fn name(&self) -> &'static str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn config_params(&self) -> Vec<ConfigParameter> {
        vec![
            ConfigParameter::required(self.param_name("default"), ParamType::Str),
            ConfigParameter::required(self.param_name("mutate_rate"), ParamType::Float),
            ConfigParameter::with_default(
                self.param_name("rate_to_true_add"),
                ParamValue::Float(0.0),
            ),
            ConfigParameter::with_default(
                self.param_name("rate_to_false_add"),
                ParamValue::Float(0.0),
            ),
        ]
    }

    fn validate(&self, config: &GeneConfig) -> Vec<ConfigValidationError> {
        let params = config.params();
        let mut errors = Vec::new();

        let default = self.param_name("default");
        if let Ok(raw) = params.string(&default) {
            if BoolDefault::parse(raw).is_none() {
                errors.push(ConfigValidationError::invalid_value(
                    default,
                    format!(
                        "unknown default '{}' (expected true, false, random or a probability)",
                        raw
                    ),
                ));
            }
        }

        for suffix in ["mutate_rate", "rate_to_true_add", "rate_to_false_add"] {
            let name = self.param_name(suffix);
            if let Ok(value) = params.float(&name) {
                if !(value >= 0.0 && value.is_finite()) {
                    errors.push(ConfigValidationError::invalid_value(
                        name,
                        "must be a finite, non-negative number",
                    ));
                }
            }
        }

        errors
    }

    fn init_value(&self, config: &GeneConfig, rng: &mut dyn RngCore) -> GeneResult<AttributeValue> {
        let value = match self.default_rule(config)? {
            BoolDefault::Fixed(value) => value,
            BoolDefault::Probability(p) => rng.gen_bool(p),
        };
        Ok(AttributeValue::Bool(value))
    }

    fn mutate_value(
        &self,
        value: &AttributeValue,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<AttributeValue> {
        let current = value.as_bool().ok_or_else(|| wrong_kind(self, value))?;
        let params = config.params();

        let polarity_add = if current {
            params.float(&self.param_name("rate_to_false_add"))?
        } else {
            params.float(&self.param_name("rate_to_true_add"))?
        };
        let rate = params.float(&self.param_name("mutate_rate"))? + polarity_add;

        if rate > 0.0 && rng.gen::<f64>() < rate {
            return Ok(AttributeValue::Bool(!current));
        }

        Ok(AttributeValue::Bool(current))
    }

    fn distance(
        &self,
        a: &AttributeValue,
        b: &AttributeValue,
        _config: &GeneConfig,
    ) -> Option<f64> {
        let differs = a.as_bool()? != b.as_bool()?;
        Some(if differs { 1.0 } else { 0.0 })
    }
}
