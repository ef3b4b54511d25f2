// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neat-genotype
//!
//! Genotype layer of a NEAT neuroevolution engine: genes whose tunable
//! attributes are initialized, mutated, recombined and compared under a
//! validated configuration.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neat-genotype = "0.1"
//! ```
//!
//! ## Feature Flags
//!
//! - **`observability`** (default): re-exports `neat-observability` for logging setup
//! - **`file-logging`**: JSON log files in a timestamped run folder
//!
//! ## Usage
//!
//! ```rust,no_run
//! use neat_genotype::prelude::*;
//!
//! // neat_configuration.toml, [genome] section
//! let config = load_config(None, None)?;
//! let gene_config = GeneConfig::from_config(&config)?;
//!
//! let mut rng = seeded_rng(7);
//! let mut parent = ConnectionGene::new(GeneKey::Connection(0, 1))?;
//! parent.init_attributes(&gene_config, &mut rng)?;
//!
//! let mut child = parent.clone();
//! child.mutate(&gene_config, &mut rng)?;
//! let offspring = parent.crossover(&child, &mut rng)?;
//! println!("{} vs {}: {}", parent, offspring, parent.distance(&offspring, &gene_config)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! neat-genotype (this crate)
//! ├── neat-config         parameter declarations, TOML loading, overrides
//! ├── neat-genes          attributes, Gene<V>, node and connection genes
//! └── neat-observability  tracing subscriber setup, debug flags
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use neat_config as config;
pub use neat_genes as genes;

#[cfg(feature = "observability")]
pub use neat_observability as observability;

/// Common imports for configuring and evolving genes
pub mod prelude {
    pub use neat_config::{load_config, ConfigError, NeatConfig};
    pub use neat_genes::random::{entropy_rng, seeded_rng};
    pub use neat_genes::{
        AttributeValue, ConnectionGene, Gene, GeneConfig, GeneError, GeneKey, GeneRecord,
        GeneResult, NodeGene,
    };

    #[cfg(feature = "observability")]
    pub use neat_observability::{init_logging, parse_debug_flags, LoggingConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        assert!(NodeGene::new(GeneKey::Node(0)).is_ok());
        assert!(ConnectionGene::new(GeneKey::Node(0)).is_err());
    }
}
