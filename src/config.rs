// Configuration module for reading Bot.toml
//
// All tunable parameters live here: coordinator connection and identity,
// search depth, and debug logging. Loaded once at startup.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub search: SearchConfig,
    pub debug: DebugConfig,
}

/// Coordinator endpoint and the identity registered at signin
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionConfig {
    pub server_addr: String,
    pub user_name: String,
    pub tournament_id: u32,
    pub user_role: String,
}

/// Search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Fixed lookahead in plies. The search has no other bound, so this is
    /// the single knob that trades strength for latency.
    pub max_depth: u8,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Bot.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        if config.search.max_depth == 0 {
            return Err("search.max_depth must be at least 1".to_string());
        }

        Ok(config)
    }

    /// Loads default configuration from Bot.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Bot.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Bot.toml
    pub fn default_hardcoded() -> Self {
        Config {
            connection: ConnectionConfig {
                server_addr: "10.100.2.41:4000".to_string(),
                user_name: "FREDY_VELASQUEZ".to_string(),
                tournament_id: 142857,
                user_role: "player".to_string(),
            },
            search: SearchConfig { max_depth: 6 },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "connect_four_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Bot.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
