// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Function registry
//!
//! Maps option names of function-valued attributes (`"sigmoid"`, `"sum"`, ...)
//! to executable implementations. A registry is consulted when the gene
//! configuration is built, so unknown names are rejected before any gene
//! exists, and later when a gene's function has to be executed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::functions::{activation, aggregation};
use crate::types::{GeneError, GeneResult};

pub type ActivationFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
pub type AggregationFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Distance from a function to another function, given by name
pub type DistanceFn = Arc<dyn Fn(&str) -> f64 + Send + Sync>;

#[derive(Clone)]
pub enum FunctionImpl {
    Activation(ActivationFn),
    Aggregation(AggregationFn),
}

/// A named function plus its optional custom distance
#[derive(Clone)]
pub struct RegisteredFunction {
    name: String,
    implementation: FunctionImpl,
    distance: Option<DistanceFn>,
}

impl RegisteredFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn implementation(&self) -> &FunctionImpl {
        &self.implementation
    }

    /// Apply an activation function; `None` for aggregation functions
    pub fn activate(&self, z: f64) -> Option<f64> {
        match &self.implementation {
            FunctionImpl::Activation(f) => Some(f(z)),
            FunctionImpl::Aggregation(_) => None,
        }
    }

    /// Apply an aggregation function; `None` for activation functions
    pub fn aggregate(&self, inputs: &[f64]) -> Option<f64> {
        match &self.implementation {
            FunctionImpl::Aggregation(f) => Some(f(inputs)),
            FunctionImpl::Activation(_) => None,
        }
    }

    /// Custom distance to `other`, if this function defines one
    pub fn distance_to(&self, other: &str) -> Option<f64> {
        self.distance.as_ref().map(|d| d(other))
    }

    pub fn has_distance(&self) -> bool {
        self.distance.is_some()
    }
}

impl fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.implementation {
            FunctionImpl::Activation(_) => "activation",
            FunctionImpl::Aggregation(_) => "aggregation",
        };
        f.debug_struct("RegisteredFunction")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("has_distance", &self.has_distance())
            .finish()
    }
}

/// Named function lookup table
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in activation functions
    pub fn activations() -> Self {
        let builtins: [(&str, fn(f64) -> f64); 18] = [
            ("sigmoid", activation::sigmoid),
            ("tanh", activation::tanh),
            ("sin", activation::sin),
            ("gauss", activation::gauss),
            ("relu", activation::relu),
            ("elu", activation::elu),
            ("lelu", activation::lelu),
            ("selu", activation::selu),
            ("softplus", activation::softplus),
            ("identity", activation::identity),
            ("clamped", activation::clamped),
            ("inv", activation::inv),
            ("log", activation::log),
            ("exp", activation::exp),
            ("abs", activation::abs),
            ("hat", activation::hat),
            ("square", activation::square),
            ("cube", activation::cube),
        ];

        let mut registry = Self::new();
        for (name, f) in builtins {
            registry.add_activation(name, f);
        }
        registry
    }

    /// Built-in aggregation functions
    pub fn aggregations() -> Self {
        let builtins: [(&str, fn(&[f64]) -> f64); 7] = [
            ("sum", aggregation::sum),
            ("product", aggregation::product),
            ("max", aggregation::max),
            ("min", aggregation::min),
            ("maxabs", aggregation::maxabs),
            ("median", aggregation::median),
            ("mean", aggregation::mean),
        ];

        let mut registry = Self::new();
        for (name, f) in builtins {
            registry.add_aggregation(name, f);
        }
        registry
    }

    /// Add (or replace) an activation function
    pub fn add_activation<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.insert(name.into(), FunctionImpl::Activation(Arc::new(f)));
    }

    /// Add (or replace) an aggregation function
    pub fn add_aggregation<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.insert(name.into(), FunctionImpl::Aggregation(Arc::new(f)));
    }

    /// Attach a custom distance to a registered function
    ///
    /// Function attributes consult it in both directions: comparing `other`
    /// with `name` uses this distance when `other` defines none of its own.
    ///
    /// # Errors
    ///
    /// Returns `GeneError::UnregisteredFunction` if `name` is not registered
    pub fn set_distance<F>(&mut self, name: &str, distance: F) -> GeneResult<()>
    where
        F: Fn(&str) -> f64 + Send + Sync + 'static,
    {
        let function = self
            .functions
            .get_mut(name)
            .ok_or_else(|| GeneError::UnregisteredFunction(name.to_string()))?;
        function.distance = Some(Arc::new(distance));
        Ok(())
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<&RegisteredFunction> {
        self.functions.get(name)
    }

    /// Check if function exists
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn insert(&mut self, name: String, implementation: FunctionImpl) {
        self.functions.insert(
            name.clone(),
            RegisteredFunction {
                name,
                implementation,
                distance: None,
            },
        );
    }
}
