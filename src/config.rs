// Configuration module for reading Gomoku.toml
// This module provides OOP-style configuration management for the engine and its tools

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub scores: ScoresConfig,
    pub selfplay: SelfPlayConfig,
    pub debug: DebugConfig,
    pub profiling: ProfilingConfig,
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Plies searched below each root candidate (opponent reply, then our reply)
    pub depth: u8,
    /// Magnitude of the forced win/loss sentinel; the remaining depth is added on top
    pub win_score: f64,
    /// Initial alpha/beta window half-width at the root
    pub initial_bound: f64,
    /// false runs plain minimax over every branch
    pub pruning: bool,
    pub parallel_root: bool,
    pub min_candidates_for_parallel: usize,
}

impl SearchConfig {
    /// Sentinel for a win found with `depth` plies still to search
    pub fn win_value(&self, depth: u8) -> f64 {
        self.win_score + depth as f64
    }
}

/// Heuristic scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    /// Largest exponent used for the 2^n line term
    pub max_line_exponent: u32,
}

/// Engine-vs-engine driver settings
#[derive(Debug, Deserialize, Clone)]
pub struct SelfPlayConfig {
    pub games: usize,
    pub max_plies: usize,
    pub random_opening_plies: usize,
    pub seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Performance profiling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProfilingConfig {
    pub enabled: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Gomoku.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Gomoku.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Gomoku.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Gomoku.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 2,
                win_score: 1_000_000.0,
                initial_bound: 100_000_000.0,
                pruning: true,
                parallel_root: false,
                min_candidates_for_parallel: 16,
            },
            scores: ScoresConfig {
                max_line_exponent: 15,
            },
            selfplay: SelfPlayConfig {
                games: 1,
                max_plies: 225,
                random_opening_plies: 2,
                seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "gomoku_debug.jsonl".to_string(),
            },
            profiling: ProfilingConfig { enabled: false },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Gomoku.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.search.depth, 2);
        assert!(config.search.pruning);
        assert_eq!(config.scores.max_line_exponent, 15);
    }

    #[test]
    fn test_win_value_prefers_shallower_wins() {
        let search = Config::default_hardcoded().search;
        assert_eq!(search.win_value(0), 1_000_000.0);
        assert!(search.win_value(2) > search.win_value(1));
    }

    #[test]
    fn test_gomoku_toml_can_be_parsed() {
        // This test ensures Gomoku.toml is valid and can be parsed
        let result = Config::from_file("Gomoku.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Gomoku.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Gomoku.toml").expect("Gomoku.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.search.depth, hardcoded_config.search.depth);
        assert_eq!(file_config.search.win_score, hardcoded_config.search.win_score);
        assert_eq!(
            file_config.search.initial_bound,
            hardcoded_config.search.initial_bound
        );
        assert_eq!(file_config.search.pruning, hardcoded_config.search.pruning);
        assert_eq!(
            file_config.search.parallel_root,
            hardcoded_config.search.parallel_root
        );
        assert_eq!(
            file_config.scores.max_line_exponent,
            hardcoded_config.scores.max_line_exponent
        );
        assert_eq!(
            file_config.selfplay.max_plies,
            hardcoded_config.selfplay.max_plies
        );
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.search.depth, 2);
    }

    #[test]
    fn test_missing_file_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_incomplete_toml_returns_error() {
        let result: Result<Config, _> = toml::from_str("[search]\ndepth = 2\n");
        assert!(result.is_err());
    }
}
