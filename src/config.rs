//! Runner configuration read from the environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::{DEFAULT_BOARD_SIZE, WIN_TILE};

/// Settings for the terminal binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub size: usize,
    pub win_tile: u32,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Save file; `None` disables persistence.
    pub save_path: Option<PathBuf>,
    /// Log file; `None` disables logging (the terminal owns stdout).
    pub log_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            win_tile: WIN_TILE,
            seed: None,
            save_path: None,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Create from `T2048_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let size = lookup("T2048_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.size);
        let win_tile = lookup("T2048_WIN_TILE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.win_tile);
        let seed = lookup("T2048_SEED").and_then(|s| s.trim().parse().ok());

        let save_path = non_empty(lookup("T2048_SAVE_PATH")).map(PathBuf::from);
        let log_path = non_empty(lookup("T2048_LOG_PATH")).map(PathBuf::from);
        let log_filter = non_empty(lookup("T2048_LOG")).unwrap_or(defaults.log_filter);

        Self {
            size,
            win_tile,
            seed,
            save_path,
            log_path,
            log_filter,
        }
    }

    /// Engine rules for this run. Validation happens in the engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            win_tile: self.win_tile,
            ..EngineConfig::with_size(self.size)
        }
    }

    /// The configured seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("T2048_SIZE", "5"),
            ("T2048_WIN_TILE", "4096"),
            ("T2048_SEED", "42"),
            ("T2048_SAVE_PATH", "/tmp/2048.json"),
            ("T2048_LOG_PATH", " /tmp/2048.log "),
            ("T2048_LOG", "debug"),
        ]));
        assert_eq!(config.size, 5);
        assert_eq!(config.win_tile, 4096);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.seed_or_clock(), 42);
        assert_eq!(config.save_path, Some(PathBuf::from("/tmp/2048.json")));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/2048.log")));
        assert_eq!(config.log_filter, "debug");

        let engine = config.engine_config();
        assert_eq!(engine.size, 5);
        assert_eq!(engine.win_tile, 4096);
    }

    #[test]
    fn blank_paths_disable_persistence_and_bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("T2048_SIZE", "huge"),
            ("T2048_SAVE_PATH", "   "),
            ("T2048_LOG", ""),
        ]));
        assert_eq!(config.size, DEFAULT_BOARD_SIZE);
        assert_eq!(config.save_path, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn oversized_board_from_env_fails_validation() {
        let config = AppConfig::from_lookup(lookup(&[("T2048_SIZE", "100000")]));
        assert!(config.engine_config().validate().is_err());
    }

    #[test]
    fn test_app_config_from_env() {
        // Only checks that reading the real environment does not panic.
        let _config = AppConfig::from_env();
    }
}
