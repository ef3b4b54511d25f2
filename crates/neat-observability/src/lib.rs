// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neat-observability
//!
//! Logging setup shared by the NEAT genotype crates, with per-crate debug
//! flag support.
//!
//! Library crates only emit `tracing` events under their crate name as the
//! target; the embedding application calls [`init_logging`] once.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Crate names accepted by debug flags, matching their log targets
pub const KNOWN_CRATES: &[&str] = &["neat-config", "neat-genes"];
