// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core error types for the gene layer.

Every error here is a programming or configuration mistake (wrong key shape,
crossing unrelated loci, invalid parameters); none of them is transient and
none is retried.
*/

use neat_config::ConfigError;
use thiserror::Error;

use crate::gene::{GeneKey, KeyKind};
use crate::attributes::ValueKind;

/// Result type for gene operations
pub type GeneResult<T> = Result<T, GeneError>;

/// Error types for gene operations
#[derive(Error, Debug)]
pub enum GeneError {
    #[error("{variant} key must be {expected}, not {found}")]
    InvalidKey {
        variant: &'static str,
        expected: KeyKind,
        found: GeneKey,
    },

    #[error("Cannot cross genes with different keys: {0} and {1}")]
    KeyMismatch(GeneKey, GeneKey),

    #[error("Cannot compare keys {0} and {1}")]
    KeyOrdering(GeneKey, GeneKey),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown attribute '{attribute}' for {variant}")]
    UnknownAttribute {
        variant: &'static str,
        attribute: String,
    },

    #[error("Attribute '{0}' has not been initialized")]
    Uninitialized(String),

    #[error("Attribute '{attribute}' holds {expected} values, got {found}")]
    ValueKind {
        attribute: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Unknown function '{name}' for attribute '{attribute}'")]
    UnknownFunction { attribute: String, name: String },

    #[error("Function '{0}' is not registered")]
    UnregisteredFunction(String),

    #[error("Invalid gene record: {0}")]
    InvalidRecord(String),
}
