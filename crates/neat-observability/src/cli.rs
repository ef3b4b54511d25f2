// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-crate debug switches
//!
//! `--debug-neat-genes` on the command line, or `NEAT_DEBUG=neat-genes` in the
//! environment, lowers that crate's log target to `debug` while everything
//! else stays at the base level.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable listing crates to debug (`all` or comma-separated names)
pub const DEBUG_ENV_VAR: &str = "NEAT_DEBUG";

/// Crates whose `tracing` target is raised to `debug`
///
/// # Example
/// ```rust
/// use neat_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(std::env::args());
/// if flags.is_enabled("neat-genes") {
///     // debug logging for neat-genes
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Collect `--debug-<crate>` arguments; `--debug-all` covers [`KNOWN_CRATES`]
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    /// Add crates named by a `NEAT_DEBUG` style value
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enable(crate_name);
            }
        }
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Sorted, so filter strings are stable
    pub fn enabled_crates(&self) -> Vec<&String> {
        let mut crates: Vec<&String> = self.enabled_crates.keys().collect();
        crates.sort();
        crates
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Filter directives for `EnvFilter`, e.g. `"neat-genes=debug,info"`
    pub fn to_filter_string(&self) -> String {
        self.filter_with_default("info")
    }

    /// Same as [`CrateDebugFlags::to_filter_string`] with `default_level`
    /// for crates without a flag
    pub fn filter_with_default(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates()
            .into_iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Debug switches from `std::env::args()` plus `NEAT_DEBUG`
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(value) = env::var(DEBUG_ENV_VAR) {
        flags.merge_env_value(&value);
    }

    flags
}

/// Usage text for the debug switches, for an application's `--help`
pub fn debug_flags_help() -> String {
    let mut help = String::from("Logging:\n");
    help.push_str("  --debug-<crate>      log <crate> at debug level\n");
    help.push_str("  --debug-all          log every crate below at debug level\n");
    help.push_str(&format!(
        "  {}=<crate>,...  same, from the environment (`all` accepted)\n",
        DEBUG_ENV_VAR
    ));
    help.push_str("\nCrates:\n");
    for crate_name in KNOWN_CRATES {
        help.push_str(&format!("  {}\n", crate_name));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neat-genes".to_string()]);
        assert!(flags.is_enabled("neat-genes"));
        assert!(!flags.is_enabled("neat-config"));
    }

    #[test]
    fn test_non_flag_arguments_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "run".to_string(),
            "--config".to_string(),
            "neat.toml".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_value() {
        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value(" neat-config , ,neat-genes");
        assert_eq!(flags.enabled_crates(), vec!["neat-config", "neat-genes"]);

        let mut flags = CrateDebugFlags::default();
        flags.merge_env_value("all");
        assert_eq!(flags.enabled_crates().len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-neat-genes".to_string(),
            "--debug-neat-config".to_string(),
        ]);
        assert_eq!(flags.to_filter_string(), "neat-config=debug,neat-genes=debug,info");
        assert_eq!(
            flags.filter_with_default("warn"),
            "neat-config=debug,neat-genes=debug,warn"
        );
    }

    #[test]
    fn test_help_lists_switches_and_crates() {
        let help = debug_flags_help();
        assert!(help.contains("--debug-all"));
        assert!(help.contains("NEAT_DEBUG=<crate>"));
        for crate_name in KNOWN_CRATES {
            assert!(help.contains(&format!("  {}\n", crate_name)));
        }
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-neat-genes".to_string()]);
        assert_eq!(flags.log_level("neat-genes"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("neat-config"), tracing::Level::INFO);
    }
}
