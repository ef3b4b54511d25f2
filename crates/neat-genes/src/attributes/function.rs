// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Attribute choosing one function from a closed set of registered names

use neat_config::{ConfigError, ConfigParameter, ConfigValidationError, ParamType, ParamValue};
use rand::{Rng, RngCore};

use super::{wrong_kind, Attribute, AttributeValue, ValueKind};
use crate::config::GeneConfig;
use crate::random::choose;
use crate::types::GeneResult;

fn is_random_default(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "random" | "none")
}

#[derive(Debug, Clone, Copy)]
pub struct FuncAttribute {
    name: &'static str,
    /// Single option used when `<name>_options` is not configured
    fallback_option: &'static str,
}

impl FuncAttribute {
    pub const fn new(name: &'static str, fallback_option: &'static str) -> Self {
        Self {
            name,
            fallback_option,
        }
    }

    pub fn fallback_option(&self) -> &'static str {
        self.fallback_option
    }

    fn random_option(
        &self,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<AttributeValue> {
        let name = self.param_name("options");
        let options = config.params().list(&name)?;
        let option = choose(rng, options)
            .ok_or_else(|| ConfigError::InvalidValue(format!("{}: no options configured", name)))?;
        Ok(AttributeValue::Function(option.clone()))
    }
}

impl Attribute for FuncAttribute {
    fn name(&self) -> &'static str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Function
    }

    fn config_params(&self) -> Vec<ConfigParameter> {
        vec![
            ConfigParameter::with_default(
                self.param_name("default"),
                ParamValue::Str("random".to_string()),
            ),
            ConfigParameter::with_default(
                self.param_name("options"),
                ParamValue::List(vec![self.fallback_option.to_string()]),
            ),
            ConfigParameter::required(self.param_name("mutate_rate"), ParamType::Float),
        ]
    }

    fn validate(&self, config: &GeneConfig) -> Vec<ConfigValidationError> {
        let params = config.params();
        let mut errors = Vec::new();
        let options_name = self.param_name("options");

        let options = params.list(&options_name).unwrap_or_default();
        if options.is_empty() {
            errors.push(ConfigValidationError::invalid_value(
                options_name.clone(),
                "at least one option is required",
            ));
        }

        match config.registry(self.name) {
            Some(registry) => {
                for option in options {
                    if !registry.contains(option) {
                        errors.push(ConfigValidationError::UnknownFunction {
                            field: options_name.clone(),
                            name: option.clone(),
                        });
                    }
                }
            }
            None => errors.push(ConfigValidationError::invalid_value(
                options_name.clone(),
                format!("no function registry for attribute '{}'", self.name),
            )),
        }

        let default_name = self.param_name("default");
        if let Ok(default) = params.string(&default_name) {
            if !is_random_default(default) && !options.iter().any(|o| o == default) {
                errors.push(ConfigValidationError::invalid_value(
                    default_name,
                    format!("'{}' is not one of {}", default, options.join(", ")),
                ));
            }
        }

        errors
    }

    fn init_value(&self, config: &GeneConfig, rng: &mut dyn RngCore) -> GeneResult<AttributeValue> {
        let default = config.params().string(&self.param_name("default"))?;
        if is_random_default(default) {
            return self.random_option(config, rng);
        }
        Ok(AttributeValue::Function(default.to_string()))
    }

    fn mutate_value(
        &self,
        value: &AttributeValue,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<AttributeValue> {
        if value.as_function().is_none() {
            return Err(wrong_kind(self, value));
        }

        let mutate_rate = config.params().float(&self.param_name("mutate_rate"))?;
        if mutate_rate > 0.0 && rng.gen::<f64>() < mutate_rate {
            return self.random_option(config, rng);
        }

        Ok(value.clone())
    }

    fn distance(
        &self,
        a: &AttributeValue,
        b: &AttributeValue,
        config: &GeneConfig,
    ) -> Option<f64> {
        let (a, b) = (a.as_function()?, b.as_function()?);
        if a == b {
            return Some(0.0);
        }
        let registry = config.registry(self.name)?;
        let forward = registry.get(a).and_then(|f| f.distance_to(b));
        forward.or_else(|| registry.get(b).and_then(|f| f.distance_to(a)))
    }
}
