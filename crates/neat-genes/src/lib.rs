// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# NEAT Genes

Genotype layer of the NEAT engine: attribute descriptors, the generic
[`Gene`] lifecycle (init, mutate, copy, crossover, distance, ordering), and
the two concrete variants [`NodeGene`] and [`ConnectionGene`].

## Architecture

```text
┌──────────────────────────────────────────────┐
│ variants   NodeGene / ConnectionGene          │
├──────────────────────────────────────────────┤
│ gene       Gene<V: GeneVariant>               │
├──────────────────────────────────────────────┤
│ attributes Float / Bool / Func descriptors    │
├──────────────────────────────────────────────┤
│ config     GeneConfig + FunctionRegistry      │
└──────────────────────────────────────────────┘
```

All descriptors and the [`GeneConfig`] are immutable once built, so genes of
independent genomes can be processed on separate threads, each with its own
random source from [`random::seeded_rng`].

## Example

```rust
use neat_genes::{random::seeded_rng, GeneConfig, GeneKey, NodeGene};

let table: toml::Table = r#"
compatibility_weight_coefficient = 0.5
bias_init_mean = 0.0
bias_init_stdev = 1.0
bias_replace_rate = 0.1
bias_mutate_rate = 0.7
bias_mutate_power = 0.5
bias_max_value = 30.0
bias_min_value = -30.0
response_init_mean = 1.0
response_init_stdev = 0.0
response_replace_rate = 0.0
response_mutate_rate = 0.0
response_mutate_power = 0.0
response_max_value = 30.0
response_min_value = -30.0
activation_mutate_rate = 0.0
aggregation_mutate_rate = 0.0
weight_init_mean = 0.0
weight_init_stdev = 1.0
weight_replace_rate = 0.1
weight_mutate_rate = 0.8
weight_mutate_power = 0.5
weight_max_value = 30.0
weight_min_value = -30.0
enabled_default = "true"
enabled_mutate_rate = 0.01
"#
.parse()
.unwrap();

let config = GeneConfig::from_table(&table).unwrap();
let mut rng = seeded_rng(42);

let mut gene = NodeGene::new(GeneKey::Node(0)).unwrap();
gene.init_attributes(&config, &mut rng).unwrap();
gene.mutate(&config, &mut rng).unwrap();
assert_eq!(gene.distance(&gene.clone(), &config).unwrap(), 0.0);
```
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod attributes;
pub mod config;
pub mod functions;
pub mod gene;
pub mod random;
pub mod registry;
pub mod types;
pub mod variants;

#[cfg(test)]
mod test_support;

pub use attributes::{Attribute, AttributeRef, AttributeValue, ValueKind};
pub use config::{GeneConfig, GeneConfigBuilder, COMPATIBILITY_WEIGHT_COEFFICIENT};
pub use gene::{Gene, GeneKey, GeneRecord, GeneVariant, KeyKind, NodeId};
pub use registry::{FunctionRegistry, RegisteredFunction};
pub use types::{GeneError, GeneResult};
pub use variants::{ConnectionGene, ConnectionVariant, NodeGene, NodeVariant};
