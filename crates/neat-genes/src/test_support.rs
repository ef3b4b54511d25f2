// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for unit tests

use crate::config::GeneConfig;

const BASE: &str = r#"
compatibility_weight_coefficient = 0.5

bias_init_mean = 0.0
bias_init_stdev = 1.0
bias_init_type = "gaussian"
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

activation_default = "sigmoid"
activation_options = "sigmoid"
activation_mutate_rate = 0.0

aggregation_default = "sum"
aggregation_options = ["sum"]
aggregation_mutate_rate = 0.0

weight_init_mean = 0.0
weight_init_stdev = 1.0
weight_init_type = "gaussian"
weight_replace_rate = 0.1
weight_mutate_rate = 0.8
weight_mutate_power = 0.5
weight_max_value = 30
weight_min_value = -30

enabled_default = "true"
enabled_mutate_rate = 0.01
"#;

/// Complete, valid `[genome]` table
pub(crate) fn test_table() -> toml::Table {
    BASE.parse().expect("base test table parses")
}

/// Configuration built from the base table with `overrides` applied on top
pub(crate) fn test_config(overrides: &str) -> GeneConfig {
    let mut table = test_table();
    let overrides: toml::Table = overrides.parse().expect("override snippet parses");
    table.extend(overrides);
    GeneConfig::from_table(&table).expect("test configuration is valid")
}
