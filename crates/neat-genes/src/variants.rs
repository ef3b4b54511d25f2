// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Node and connection genes.

| Variant | Key | Attributes |
|---------|-----|------------|
| [`NodeGene`] | `i64` node id | bias, response, activation, aggregation |
| [`ConnectionGene`] | `(source, target)` | weight, enabled |

Self-loops (`source == target`) are accepted; graph structure rules belong to
the genome.
*/

use crate::attributes::{
    attribute_distance, AttributeRef, BoolAttribute, FloatAttribute, FuncAttribute,
};
use crate::config::GeneConfig;
use crate::gene::{Gene, GeneKey, GeneVariant, KeyKind, NodeId};
use crate::registry::RegisteredFunction;
use crate::types::{GeneError, GeneResult};

pub static BIAS: FloatAttribute = FloatAttribute::new("bias");
pub static RESPONSE: FloatAttribute = FloatAttribute::new("response");
pub static ACTIVATION: FuncAttribute = FuncAttribute::new("activation", "sigmoid");
pub static AGGREGATION: FuncAttribute = FuncAttribute::new("aggregation", "sum");

pub static WEIGHT: FloatAttribute = FloatAttribute::new("weight");
pub static ENABLED: BoolAttribute = BoolAttribute::new("enabled");

static NODE_ATTRIBUTES: [AttributeRef; 4] = [&BIAS, &RESPONSE, &ACTIVATION, &AGGREGATION];
static CONNECTION_ATTRIBUTES: [AttributeRef; 2] = [&WEIGHT, &ENABLED];

/// Sum of per-attribute distances, equality penalty where none is defined
fn summed_distance<V: GeneVariant>(
    a: &Gene<V>,
    b: &Gene<V>,
    config: &GeneConfig,
) -> GeneResult<f64> {
    let mut total = 0.0;
    for attribute in V::attributes() {
        let name = attribute.name();
        total += attribute_distance(*attribute, a.value(name)?, b.value(name)?, config);
    }
    Ok(total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeVariant;

impl GeneVariant for NodeVariant {
    type Key = NodeId;

    const NAME: &'static str = "NodeGene";
    const KEY_KIND: KeyKind = KeyKind::Node;

    fn key_from(key: GeneKey) -> GeneResult<NodeId> {
        match key {
            GeneKey::Node(id) => Ok(id),
            other => Err(Self::invalid_key(other)),
        }
    }

    fn attributes() -> &'static [AttributeRef] {
        &NODE_ATTRIBUTES
    }

    /// `|Δbias| + |Δresponse| + activation penalty + aggregation penalty`
    fn raw_distance(a: &Gene<Self>, b: &Gene<Self>, config: &GeneConfig) -> GeneResult<f64> {
        summed_distance(a, b, config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionVariant;

impl GeneVariant for ConnectionVariant {
    type Key = (NodeId, NodeId);

    const NAME: &'static str = "ConnectionGene";
    const KEY_KIND: KeyKind = KeyKind::Connection;

    fn key_from(key: GeneKey) -> GeneResult<(NodeId, NodeId)> {
        match key {
            GeneKey::Connection(source, target) => Ok((source, target)),
            other => Err(Self::invalid_key(other)),
        }
    }

    fn attributes() -> &'static [AttributeRef] {
        &CONNECTION_ATTRIBUTES
    }

    /// `|Δweight| + (1 if enabled differs)`
    fn raw_distance(a: &Gene<Self>, b: &Gene<Self>, config: &GeneConfig) -> GeneResult<f64> {
        summed_distance(a, b, config)
    }
}

pub type NodeGene = Gene<NodeVariant>;
pub type ConnectionGene = Gene<ConnectionVariant>;

impl Gene<NodeVariant> {
    pub fn bias(&self) -> GeneResult<f64> {
        self.float("bias")
    }

    pub fn response(&self) -> GeneResult<f64> {
        self.float("response")
    }

    pub fn activation(&self) -> GeneResult<&str> {
        self.function("activation")
    }

    pub fn aggregation(&self) -> GeneResult<&str> {
        self.function("aggregation")
    }

    /// Executable activation function for the current option
    pub fn activation_function<'a>(
        &self,
        config: &'a GeneConfig,
    ) -> GeneResult<&'a RegisteredFunction> {
        resolve(config, "activation", self.activation()?)
    }

    /// Executable aggregation function for the current option
    pub fn aggregation_function<'a>(
        &self,
        config: &'a GeneConfig,
    ) -> GeneResult<&'a RegisteredFunction> {
        resolve(config, "aggregation", self.aggregation()?)
    }
}

fn resolve<'a>(
    config: &'a GeneConfig,
    attribute: &str,
    name: &str,
) -> GeneResult<&'a RegisteredFunction> {
    config
        .registry(attribute)
        .and_then(|registry| registry.get(name))
        .ok_or_else(|| GeneError::UnknownFunction {
            attribute: attribute.to_string(),
            name: name.to_string(),
        })
}

impl Gene<ConnectionVariant> {
    pub fn source(&self) -> NodeId {
        self.key().0
    }

    pub fn target(&self) -> NodeId {
        self.key().1
    }

    pub fn weight(&self) -> GeneResult<f64> {
        self.float("weight")
    }

    pub fn enabled(&self) -> GeneResult<bool> {
        self.boolean("enabled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;
    use crate::random::seeded_rng;
    use crate::test_support::test_config;

    fn node(
        key: NodeId,
        bias: f64,
        response: f64,
        activation: &str,
        aggregation: &str,
    ) -> NodeGene {
        let mut gene = NodeGene::with_key(key);
        gene.set("bias", AttributeValue::Float(bias)).unwrap();
        gene.set("response", AttributeValue::Float(response)).unwrap();
        gene.set("activation", AttributeValue::Function(activation.into())).unwrap();
        gene.set("aggregation", AttributeValue::Function(aggregation.into())).unwrap();
        gene
    }

    fn connection(key: (NodeId, NodeId), weight: f64, enabled: bool) -> ConnectionGene {
        let mut gene = ConnectionGene::with_key(key);
        gene.set("weight", AttributeValue::Float(weight)).unwrap();
        gene.set("enabled", AttributeValue::Bool(enabled)).unwrap();
        gene
    }

    #[test]
    fn test_connection_distance() {
        let config = test_config("compatibility_weight_coefficient = 0.5");
        let a = connection((1, 2), 2.0, true);
        let b = connection((1, 2), -1.0, false);
        assert_eq!(a.distance(&b, &config).unwrap(), 2.0);
    }

    #[test]
    fn test_node_distance() {
        let config = test_config("compatibility_weight_coefficient = 1.0");
        let a = node(7, 1.0, 0.0, "sigmoid", "sum");
        let b = node(7, -1.0, 0.0, "sigmoid", "sum");
        assert_eq!(a.distance(&b, &config).unwrap(), 2.0);
    }

    #[test]
    fn test_node_distance_counts_function_penalties() {
        let config = test_config(
            "compatibility_weight_coefficient = 1.0\n\
             activation_options = \"sigmoid tanh\"\n\
             aggregation_options = \"sum max\"",
        );
        let a = node(1, 0.0, 1.0, "sigmoid", "sum");
        let b = node(1, 0.0, 1.0, "tanh", "max");
        assert_eq!(a.distance(&b, &config).unwrap(), 2.0);
        assert_eq!(b.distance(&a, &config).unwrap(), 2.0);
    }

    #[test]
    fn test_distance_requires_initialized_genes() {
        let config = test_config("");
        let a = connection((1, 2), 0.0, true);
        let b = ConnectionGene::with_key((1, 2));
        assert!(matches!(a.distance(&b, &config), Err(GeneError::Uninitialized(_))));
    }

    #[test]
    fn test_connection_accessors_allow_self_loop() {
        let gene = connection((3, 3), 0.25, false);
        assert_eq!(gene.source(), 3);
        assert_eq!(gene.target(), 3);
        assert_eq!(gene.weight().unwrap(), 0.25);
        assert!(!gene.enabled().unwrap());
    }

    #[test]
    fn test_node_functions_resolve_through_registry() {
        let config = test_config("");
        let mut gene = NodeGene::with_key(0);
        gene.init_attributes(&config, &mut seeded_rng(3)).unwrap();

        let activation = gene.activation_function(&config).unwrap();
        assert_eq!(activation.name(), "sigmoid");
        assert_eq!(activation.activate(0.0), Some(0.5));

        let aggregation = gene.aggregation_function(&config).unwrap();
        assert_eq!(aggregation.aggregate(&[1.0, 2.0, 3.0]), Some(6.0));
    }

    #[test]
    fn test_unregistered_function_value_is_reported() {
        let config = test_config("");
        let gene = node(0, 0.0, 1.0, "swish", "sum");
        assert!(matches!(
            gene.activation_function(&config),
            Err(GeneError::UnknownFunction { name, .. }) if name == "swish"
        ));
    }

    #[test]
    fn test_display() {
        let gene = node(3, 0.5, 1.0, "sigmoid", "sum");
        assert_eq!(
            gene.to_string(),
            "NodeGene(key=3, bias=0.5, response=1, activation=\"sigmoid\", aggregation=\"sum\")"
        );
    }
}
