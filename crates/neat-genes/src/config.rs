// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Gene configuration.

A [`GeneConfig`] is the read-only view every gene operation consumes: the
resolved attribute parameters, the compatibility weight coefficient and the
function registries backing function-valued attributes. It can only be
obtained through [`GeneConfigBuilder::build`], which checks every declared
parameter and every attribute constraint up front.
*/

use std::collections::HashMap;
use std::sync::Arc;

use neat_config::{
    into_result, ConfigParameter, ConfigValidationError, NeatConfig, ParamType, ParameterSet,
};
use tracing::debug;

use crate::attributes::AttributeRef;
use crate::gene::GeneVariant;
use crate::registry::FunctionRegistry;
use crate::types::GeneResult;
use crate::variants::{ConnectionVariant, NodeVariant};

/// Name of the coefficient scaling every gene distance
pub const COMPATIBILITY_WEIGHT_COEFFICIENT: &str = "compatibility_weight_coefficient";

#[derive(Debug, Clone)]
pub struct GeneConfig {
    params: ParameterSet,
    compatibility_weight_coefficient: f64,
    registries: HashMap<String, Arc<FunctionRegistry>>,
}

impl GeneConfig {
    pub fn builder() -> GeneConfigBuilder {
        GeneConfigBuilder::default()
    }

    /// Configuration for the default node and connection genes, backed by
    /// the built-in activation and aggregation functions
    ///
    /// # Errors
    ///
    /// Returns `GeneError::Config` describing every invalid or missing parameter
    pub fn from_table(table: &toml::Table) -> GeneResult<Self> {
        Self::builder()
            .variant::<NodeVariant>()
            .variant::<ConnectionVariant>()
            .registry("activation", FunctionRegistry::activations())
            .registry("aggregation", FunctionRegistry::aggregations())
            .build(table)
    }

    /// Same as [`GeneConfig::from_table`] using the `[genome]` section
    pub fn from_config(config: &NeatConfig) -> GeneResult<Self> {
        Self::from_table(&config.genome)
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn compatibility_weight_coefficient(&self) -> f64 {
        self.compatibility_weight_coefficient
    }

    /// Function registry backing the attribute `attribute`
    pub fn registry(&self, attribute: &str) -> Option<&Arc<FunctionRegistry>> {
        self.registries.get(attribute)
    }
}

#[derive(Default)]
pub struct GeneConfigBuilder {
    attributes: Vec<AttributeRef>,
    registries: HashMap<String, Arc<FunctionRegistry>>,
}

impl GeneConfigBuilder {
    /// Include every attribute of gene variant `V`
    pub fn variant<V: GeneVariant>(mut self) -> Self {
        for attribute in V::attributes() {
            let known = self
                .attributes
                .iter()
                .any(|existing| existing.name() == attribute.name());
            if !known {
                self.attributes.push(*attribute);
            }
        }
        self
    }

    /// Registry resolving the options of the function attribute `attribute`
    pub fn registry(mut self, attribute: &str, registry: impl Into<Arc<FunctionRegistry>>) -> Self {
        self.registries.insert(attribute.to_string(), registry.into());
        self
    }

    /// Every parameter the configured variants require
    pub fn config_params(&self) -> Vec<ConfigParameter> {
        let mut params = vec![ConfigParameter::required(
            COMPATIBILITY_WEIGHT_COEFFICIENT,
            ParamType::Float,
        )];
        for attribute in &self.attributes {
            params.extend(attribute.config_params());
        }
        params
    }

    /// Resolve and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `GeneError::Config` listing every problem: missing or mistyped
    /// parameters, unknown items, and attribute constraint violations such as
    /// unknown function names
    pub fn build(self, table: &toml::Table) -> GeneResult<GeneConfig> {
        let params = ParameterSet::resolve(&self.config_params(), table)?;
        let coefficient = params.float(COMPATIBILITY_WEIGHT_COEFFICIENT)?;

        let config = GeneConfig {
            params,
            compatibility_weight_coefficient: coefficient,
            registries: self.registries,
        };

        let mut errors = Vec::new();
        if !(coefficient >= 0.0 && coefficient.is_finite()) {
            errors.push(ConfigValidationError::invalid_value(
                COMPATIBILITY_WEIGHT_COEFFICIENT,
                "must be a finite, non-negative number",
            ));
        }
        errors.extend(
            self.attributes
                .iter()
                .flat_map(|attribute| attribute.validate(&config)),
        );
        into_result(errors)?;

        debug!(
            target: "neat-genes",
            "Gene configuration built: {} attributes, {} parameters",
            self.attributes.len(),
            config.params.len()
        );

        Ok(config)
    }
}
