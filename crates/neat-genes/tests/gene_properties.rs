// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle properties that hold for every gene variant

use neat_genes::random::seeded_rng;
use neat_genes::{
    AttributeValue, ConnectionGene, ConnectionVariant, FunctionRegistry, Gene, GeneConfig,
    GeneError, GeneKey, GeneVariant, NodeGene, NodeVariant,
};
use rayon::prelude::*;

const GENOME: &str = r#"
compatibility_weight_coefficient = 0.6

bias_init_mean = 0.0
bias_init_stdev = 2.0
bias_init_type = "uniform"
bias_replace_rate = 0.2
bias_mutate_rate = 0.6
bias_mutate_power = 1.5
bias_max_value = 4.0
bias_min_value = -4.0

response_init_mean = 1.0
response_init_stdev = 0.5
response_replace_rate = 0.1
response_mutate_rate = 0.5
response_mutate_power = 0.5
response_max_value = 2.0
response_min_value = 0.0

activation_default = "random"
activation_options = "sigmoid tanh relu gauss"
activation_mutate_rate = 0.3

aggregation_default = "random"
aggregation_options = ["sum", "max", "mean"]
aggregation_mutate_rate = 0.3

weight_init_mean = 0.0
weight_init_stdev = 3.0
weight_replace_rate = 0.1
weight_mutate_rate = 0.8
weight_mutate_power = 2.0
weight_max_value = 5.0
weight_min_value = -5.0

enabled_default = "0.7"
enabled_mutate_rate = 0.2
enabled_rate_to_true_add = 0.1
"#;

fn config() -> GeneConfig {
    let table: toml::Table = GENOME.parse().unwrap();
    GeneConfig::from_table(&table).unwrap()
}

fn random_node(key: i64, seed: u64, config: &GeneConfig) -> NodeGene {
    let mut rng = seeded_rng(seed);
    let mut gene = NodeGene::with_key(key);
    gene.init_attributes(config, &mut rng).unwrap();
    for _ in 0..10 {
        gene.mutate(config, &mut rng).unwrap();
    }
    gene
}

fn random_connection(key: (i64, i64), seed: u64, config: &GeneConfig) -> ConnectionGene {
    let mut rng = seeded_rng(seed);
    let mut gene = ConnectionGene::with_key(key);
    gene.init_attributes(config, &mut rng).unwrap();
    for _ in 0..10 {
        gene.mutate(config, &mut rng).unwrap();
    }
    gene
}

fn assert_within(gene: &impl std::fmt::Display, value: f64, min: f64, max: f64) {
    assert!((min..=max).contains(&value), "{} outside [{}, {}] in {}", value, min, max, gene);
}

#[test]
fn test_distance_to_self_is_zero() {
    let config = config();
    for seed in 0..50 {
        let node = random_node(1, seed, &config);
        assert_eq!(node.distance(&node, &config).unwrap(), 0.0);
        let connection = random_connection((1, 2), seed, &config);
        assert_eq!(connection.distance(&connection, &config).unwrap(), 0.0);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let config = config();
    for seed in 0..50 {
        let a = random_node(3, seed, &config);
        let b = random_node(3, seed + 1000, &config);
        assert_eq!(a.distance(&b, &config).unwrap(), b.distance(&a, &config).unwrap());

        let a = random_connection((3, 4), seed, &config);
        let b = random_connection((3, 4), seed + 1000, &config);
        assert_eq!(a.distance(&b, &config).unwrap(), b.distance(&a, &config).unwrap());
    }
}

#[test]
fn test_distance_is_symmetric_with_one_sided_function_distance() {
    let mut activations = FunctionRegistry::activations();
    activations
        .set_distance("sigmoid", |other| if other == "tanh" { 0.2 } else { 1.0 })
        .unwrap();
    let table: toml::Table = GENOME.parse().unwrap();
    let config = GeneConfig::builder()
        .variant::<NodeVariant>()
        .variant::<ConnectionVariant>()
        .registry("activation", activations)
        .registry("aggregation", FunctionRegistry::aggregations())
        .build(&table)
        .unwrap();

    let mut a = random_node(6, 3, &config);
    let mut b = a.clone();
    a.set("activation", AttributeValue::Function("sigmoid".into())).unwrap();
    b.set("activation", AttributeValue::Function("tanh".into())).unwrap();

    let forward = a.distance(&b, &config).unwrap();
    let backward = b.distance(&a, &config).unwrap();
    assert_eq!(forward, backward);
    assert!((forward - 0.2 * 0.6).abs() < 1e-12, "{}", forward);
}

#[test]
fn test_copy_is_independent() {
    let config = config();
    let original = random_node(5, 1, &config);
    let snapshot = original.to_record();

    let mut copy = original.clone();
    let mut rng = seeded_rng(99);
    for _ in 0..100 {
        copy.mutate(&config, &mut rng).unwrap();
    }
    copy.set("activation", AttributeValue::Function("relu".into())).unwrap();

    assert_eq!(original.to_record(), snapshot);
}

#[test]
fn test_numeric_attributes_stay_in_bounds() {
    let config = config();
    let mut rng = seeded_rng(2024);
    let mut node = NodeGene::with_key(0);
    let mut connection = ConnectionGene::with_key((0, 1));
    node.init_attributes(&config, &mut rng).unwrap();
    connection.init_attributes(&config, &mut rng).unwrap();

    for _ in 0..2000 {
        assert_within(&node, node.bias().unwrap(), -4.0, 4.0);
        assert_within(&node, node.response().unwrap(), 0.0, 2.0);
        assert_within(&connection, connection.weight().unwrap(), -5.0, 5.0);
        node.mutate(&config, &mut rng).unwrap();
        connection.mutate(&config, &mut rng).unwrap();
    }
}

#[test]
fn test_function_attributes_stay_within_options() {
    let config = config();
    let mut rng = seeded_rng(8);
    let mut node = NodeGene::with_key(0);
    node.init_attributes(&config, &mut rng).unwrap();
    for _ in 0..500 {
        node.mutate(&config, &mut rng).unwrap();
        assert!(["sigmoid", "tanh", "relu", "gauss"].contains(&node.activation().unwrap()));
        assert!(["sum", "max", "mean"].contains(&node.aggregation().unwrap()));
    }
}

#[test]
fn test_crossover_with_identical_clone_preserves_values() {
    let config = config();
    let mut rng = seeded_rng(31);
    for seed in 0..20 {
        let gene = random_node(9, seed, &config);
        let child = gene.crossover(&gene.clone(), &mut rng).unwrap();
        assert_eq!(child, gene);

        let gene = random_connection((9, 9), seed, &config);
        let child = gene.crossover(&gene.clone(), &mut rng).unwrap();
        assert_eq!(child, gene);
    }
}

#[test]
fn test_crossover_children_take_values_from_parents() {
    let config = config();
    let a = random_connection((1, 2), 1, &config);
    let b = random_connection((1, 2), 2, &config);
    let mut rng = seeded_rng(4);
    for _ in 0..50 {
        let child = a.crossover(&b, &mut rng).unwrap();
        let weight = child.weight().unwrap();
        assert!(weight == a.weight().unwrap() || weight == b.weight().unwrap());
        let enabled = child.enabled().unwrap();
        assert!(enabled == a.enabled().unwrap() || enabled == b.enabled().unwrap());
    }
}

#[test]
fn test_crossover_with_different_key_fails() {
    let config = config();
    let a = random_node(1, 1, &config);
    let b = random_node(2, 1, &config);
    let err = a.crossover(&b, &mut seeded_rng(0)).unwrap_err();
    assert!(matches!(err, GeneError::KeyMismatch(GeneKey::Node(1), GeneKey::Node(2))));
}

#[test]
fn test_ordering() {
    let config = config();
    let mut nodes: Vec<NodeGene> = [5, -1, 3].iter().map(|&k| random_node(k, 0, &config)).collect();
    nodes.sort_by(|a, b| a.cmp_key(b));
    let keys: Vec<i64> = nodes.iter().map(|g| g.key()).collect();
    assert_eq!(keys, vec![-1, 3, 5]);

    let connection = random_connection((0, 1), 0, &config);
    assert!(matches!(
        nodes[0].try_cmp(&connection),
        Err(GeneError::KeyOrdering(GeneKey::Node(-1), GeneKey::Connection(0, 1)))
    ));
    assert!(nodes[0].try_cmp(&nodes[1]).unwrap().is_lt());
}

#[test]
fn test_same_seed_reproduces_genes() {
    let config = config();
    assert_eq!(random_node(4, 77, &config), random_node(4, 77, &config));
    assert_eq!(random_connection((4, 5), 77, &config), random_connection((4, 5), 77, &config));
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_shared_state_is_thread_safe() {
    assert_send_sync::<GeneConfig>();
    assert_send_sync::<NodeGene>();
    assert_send_sync::<ConnectionGene>();
}

fn evolve<V: GeneVariant>(mut gene: Gene<V>, seed: u64, config: &GeneConfig) -> Gene<V> {
    let mut rng = seeded_rng(seed);
    gene.init_attributes(config, &mut rng).unwrap();
    for _ in 0..25 {
        gene.mutate(config, &mut rng).unwrap();
    }
    gene
}

#[test]
fn test_parallel_workers_match_serial_run() {
    let config = config();
    let keys: Vec<(i64, i64)> = (0..64).map(|i| (i, i + 1)).collect();

    let serial: Vec<ConnectionGene> = keys
        .iter()
        .map(|&key| evolve(ConnectionGene::with_key(key), key.0 as u64, &config))
        .collect();
    let parallel: Vec<ConnectionGene> = keys
        .par_iter()
        .map(|&key| evolve(ConnectionGene::with_key(key), key.0 as u64, &config))
        .collect();

    assert_eq!(serial, parallel);
}
