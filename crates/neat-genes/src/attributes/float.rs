// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bounded numeric attribute

use neat_config::{ConfigError, ConfigParameter, ConfigValidationError, ParamType, ParamValue};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use super::{wrong_kind, Attribute, AttributeValue, ValueKind};
use crate::config::GeneConfig;
use crate::types::GeneResult;

/// Distribution used for fresh values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitType {
    /// `N(init_mean, init_stdev)`
    Gaussian,
    /// Uniform over `init_mean ± 2·init_stdev`, intersected with the bounds
    Uniform,
}

impl InitType {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        if value.contains("gauss") || value.contains("normal") {
            Some(InitType::Gaussian)
        } else if value.contains("uniform") {
            Some(InitType::Uniform)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FloatAttribute {
    name: &'static str,
}

impl FloatAttribute {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn bounds(&self, config: &GeneConfig) -> GeneResult<(f64, f64)> {
        let params = config.params();
        Ok((
            params.float(&self.param_name("min_value"))?,
            params.float(&self.param_name("max_value"))?,
        ))
    }

    fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
        value.max(min).min(max)
    }

    /// `mean ± 2·stdev` intersected with the bounds
    fn uniform_range(mean: f64, stdev: f64, (min, max): (f64, f64)) -> (f64, f64) {
        (min.max(mean - 2.0 * stdev), max.min(mean + 2.0 * stdev))
    }

    fn init_type(&self, config: &GeneConfig) -> GeneResult<InitType> {
        let name = self.param_name("init_type");
        let raw = config.params().string(&name)?;
        InitType::parse(raw).ok_or_else(|| {
            ConfigError::InvalidValue(format!("{}: unknown init type '{}'", name, raw)).into()
        })
    }
}

fn normal(mean: f64, stdev: f64, field: &str) -> GeneResult<Normal<f64>> {
    Normal::new(mean, stdev).map_err(|e| {
        ConfigError::InvalidValue(format!("{}: {} (stdev = {})", field, e, stdev)).into()
    })
}

impl Attribute for FloatAttribute {
    fn name(&self) -> &'static str {
        self.name
    }

    fn value_kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn config_params(&self) -> Vec<ConfigParameter> {
        vec![
            ConfigParameter::required(self.param_name("init_mean"), ParamType::Float),
            ConfigParameter::required(self.param_name("init_stdev"), ParamType::Float),
            ConfigParameter::with_default(
                self.param_name("init_type"),
                ParamValue::Str("gaussian".to_string()),
            ),
            ConfigParameter::required(self.param_name("replace_rate"), ParamType::Float),
            ConfigParameter::required(self.param_name("mutate_rate"), ParamType::Float),
            ConfigParameter::required(self.param_name("mutate_power"), ParamType::Float),
            ConfigParameter::required(self.param_name("max_value"), ParamType::Float),
            ConfigParameter::required(self.param_name("min_value"), ParamType::Float),
        ]
    }

    fn validate(&self, config: &GeneConfig) -> Vec<ConfigValidationError> {
        let params = config.params();
        let mut errors = Vec::new();

        for suffix in ["init_mean", "min_value", "max_value"] {
            let name = self.param_name(suffix);
            if let Ok(value) = params.float(&name) {
                if !value.is_finite() {
                    errors.push(ConfigValidationError::invalid_value(name, "must be finite"));
                }
            }
        }

        if let Ok((min, max)) = self.bounds(config) {
            if max < min {
                errors.push(ConfigValidationError::invalid_value(
                    self.param_name("max_value"),
                    format!("must not be less than {} ({})", self.param_name("min_value"), min),
                ));
            }
        }

        let init_type = self.param_name("init_type");
        if let Ok(raw) = params.string(&init_type) {
            match InitType::parse(raw) {
                None => errors.push(ConfigValidationError::invalid_value(
                    init_type,
                    format!("unknown init type '{}' (expected gaussian, normal or uniform)", raw),
                )),
                Some(InitType::Uniform) => {
                    let mean = params.float(&self.param_name("init_mean"));
                    let stdev = params.float(&self.param_name("init_stdev"));
                    if let (Ok(mean), Ok(stdev), Ok(bounds)) = (mean, stdev, self.bounds(config)) {
                        let (low, high) = Self::uniform_range(mean, stdev, bounds);
                        if !(high - low).is_finite() {
                            errors.push(ConfigValidationError::invalid_value(
                                init_type,
                                format!("uniform range [{}, {}] is too wide to sample", low, high),
                            ));
                        }
                    }
                }
                Some(InitType::Gaussian) => {}
            }
        }

        for suffix in ["init_stdev", "replace_rate", "mutate_rate", "mutate_power"] {
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
        let params = config.params();
        let mean = params.float(&self.param_name("init_mean"))?;
        let stdev = params.float(&self.param_name("init_stdev"))?;
        let bounds = self.bounds(config)?;

        let value = match self.init_type(config)? {
            InitType::Gaussian => {
                normal(mean, stdev, &self.param_name("init_stdev"))?.sample(&mut *rng)
            }
            InitType::Uniform => {
                let (low, high) = Self::uniform_range(mean, stdev, bounds);
                if !(high - low).is_finite() {
                    return Err(ConfigError::InvalidValue(format!(
                        "{}: uniform range [{}, {}] is too wide to sample",
                        self.param_name("init_type"),
                        low,
                        high
                    ))
                    .into());
                }
                if low <= high {
                    rng.gen_range(low..=high)
                } else {
                    mean
                }
            }
        };

        Ok(AttributeValue::Float(Self::clamp(value, bounds)))
    }

    fn mutate_value(
        &self,
        value: &AttributeValue,
        config: &GeneConfig,
        rng: &mut dyn RngCore,
    ) -> GeneResult<AttributeValue> {
        let current = value.as_float().ok_or_else(|| wrong_kind(self, value))?;
        let params = config.params();
        let mutate_rate = params.float(&self.param_name("mutate_rate"))?;
        let replace_rate = params.float(&self.param_name("replace_rate"))?;

        let r: f64 = rng.gen();
        if r < mutate_rate {
            let power_name = self.param_name("mutate_power");
            let power = params.float(&power_name)?;
            let delta = normal(0.0, power, &power_name)?.sample(&mut *rng);
            return Ok(AttributeValue::Float(Self::clamp(
                current + delta,
                self.bounds(config)?,
            )));
        }

        if r < mutate_rate + replace_rate {
            return self.init_value(config, rng);
        }

        Ok(AttributeValue::Float(current))
    }

    fn distance(
        &self,
        a: &AttributeValue,
        b: &AttributeValue,
        _config: &GeneConfig,
    ) -> Option<f64> {
        Some((a.as_float()? - b.as_float()?).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use crate::test_support::{test_config, test_table};

    static WEIGHT: FloatAttribute = FloatAttribute::new("weight");

    #[test]
    fn test_config_params_use_attribute_prefix() {
        let names: Vec<String> = WEIGHT.config_params().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "weight_init_mean",
                "weight_init_stdev",
                "weight_init_type",
                "weight_replace_rate",
                "weight_mutate_rate",
                "weight_mutate_power",
                "weight_max_value",
                "weight_min_value",
            ]
        );
    }

    #[test]
    fn test_init_type_parsing() {
        assert_eq!(InitType::parse("gaussian"), Some(InitType::Gaussian));
        assert_eq!(InitType::parse("Normal"), Some(InitType::Gaussian));
        assert_eq!(InitType::parse("uniform"), Some(InitType::Uniform));
        assert_eq!(InitType::parse("cauchy"), None);
    }

    #[test]
    fn test_init_value_is_reproducible_and_bounded() {
        let config = test_config("");
        let a = WEIGHT.init_value(&config, &mut seeded_rng(11)).unwrap();
        let b = WEIGHT.init_value(&config, &mut seeded_rng(11)).unwrap();
        assert_eq!(a, b);

        let v = a.as_float().unwrap();
        assert!((-30.0..=30.0).contains(&v));
    }

    #[test]
    fn test_init_value_clamps_to_bounds() {
        let config = test_config(
            "weight_init_mean = 10.0\n\
             weight_init_stdev = 5.0\n\
             weight_min_value = -1.0\n\
             weight_max_value = 1.0",
        );
        let mut rng = seeded_rng(5);
        for _ in 0..200 {
            let v = WEIGHT.init_value(&config, &mut rng).unwrap().as_float().unwrap();
            assert!((-1.0..=1.0).contains(&v), "{} escaped the bounds", v);
        }
    }

    #[test]
    fn test_mutate_value_stays_in_bounds() {
        let config = test_config("weight_mutate_power = 50.0");
        let mut rng = seeded_rng(9);
        let mut value = AttributeValue::Float(29.5);
        for _ in 0..500 {
            value = WEIGHT.mutate_value(&value, &config, &mut rng).unwrap();
            let v = value.as_float().unwrap();
            assert!((-30.0..=30.0).contains(&v), "{} escaped the bounds", v);
        }
    }

    #[test]
    fn test_mutate_value_unchanged_when_rates_are_zero() {
        let config = test_config("weight_mutate_rate = 0.0\nweight_replace_rate = 0.0");
        let mut rng = seeded_rng(2);
        let value = AttributeValue::Float(1.25);
        for _ in 0..50 {
            assert_eq!(WEIGHT.mutate_value(&value, &config, &mut rng).unwrap(), value);
        }
    }

    #[test]
    fn test_mutate_value_always_perturbs_at_full_rate() {
        let config = test_config("weight_mutate_rate = 1.0");
        let mut rng = seeded_rng(4);
        let value = AttributeValue::Float(0.0);
        let changed = (0..50)
            .filter(|_| WEIGHT.mutate_value(&value, &config, &mut rng).unwrap() != value)
            .count();
        assert_eq!(changed, 50);
    }

    #[test]
    fn test_mutate_value_rejects_wrong_kind() {
        let config = test_config("");
        let result = WEIGHT.mutate_value(&AttributeValue::Bool(true), &config, &mut seeded_rng(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for snippet in [
            "weight_init_mean = \"nan\"",
            "weight_min_value = \"nan\"",
            "weight_max_value = \"inf\"",
        ] {
            let mut table = test_table();
            table.extend(snippet.parse::<toml::Table>().unwrap());
            let message = GeneConfig::from_table(&table).unwrap_err().to_string();
            assert!(message.contains("must be finite"), "{}: {}", snippet, message);
        }
    }

    #[test]
    fn test_unsampleable_uniform_range_rejected() {
        let mut table = test_table();
        table.extend(
            "weight_init_type = \"uniform\"\n\
             weight_init_stdev = 1e308\n\
             weight_min_value = -1e308\n\
             weight_max_value = 1e308"
                .parse::<toml::Table>()
                .unwrap(),
        );
        let message = GeneConfig::from_table(&table).unwrap_err().to_string();
        assert!(message.contains("weight_init_type"), "{}", message);
    }

    #[test]
    fn test_wide_finite_uniform_range_samples_within_bounds() {
        let config = test_config(
            "weight_init_type = \"uniform\"\n\
             weight_init_stdev = 1e300\n\
             weight_min_value = -1e307\n\
             weight_max_value = 1e307",
        );
        let mut rng = seeded_rng(13);
        for _ in 0..100 {
            let v = WEIGHT.init_value(&config, &mut rng).unwrap().as_float().unwrap();
            assert!((-1e307..=1e307).contains(&v));
        }
    }

    #[test]
    fn test_distance_is_absolute_difference() {
        let config = test_config("");
        let d = WEIGHT.distance(&AttributeValue::Float(2.0), &AttributeValue::Float(-1.0), &config);
        assert_eq!(d, Some(3.0));
    }
}
