//! Application configuration

use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// World whose pending override this process serves
    pub world_id: String,

    /// User ids allowed to set the override
    pub gm_user_ids: HashSet<String>,

    /// Override store configuration
    pub override_store: OverrideStoreConfig,
}

/// Override store configuration
#[derive(Debug, Clone)]
pub struct OverrideStoreConfig {
    /// Whether the override feature is installed at all
    pub enabled: bool,
    /// Backend type: "sqlite" or "memory"
    pub backend: String,
    /// Path to the SQLite database file
    pub sqlite_path: String,
}

impl Default for OverrideStoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "sqlite".to_string(),
            sqlite_path: "./data/d20_override.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = OverrideStoreConfig::default();

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            world_id: env::var("WORLD_ID").unwrap_or_else(|_| "default".to_string()),

            gm_user_ids: parse_user_ids(
                &env::var("GM_USER_IDS").unwrap_or_else(|_| "gm".to_string()),
            ),

            override_store: OverrideStoreConfig {
                enabled: env::var("OVERRIDE_ENABLED")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(Ok(defaults.enabled))
                    .context("OVERRIDE_ENABLED must be true or false")?,
                backend: env::var("OVERRIDE_STORE_BACKEND").unwrap_or(defaults.backend),
                sqlite_path: env::var("OVERRIDE_SQLITE_PATH").unwrap_or(defaults.sqlite_path),
            },
        })
    }

    pub fn is_game_master(&self, user_id: &str) -> bool {
        self.gm_user_ids.contains(user_id)
    }
}

fn parse_user_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid flag value: {}", other),
    }
}

#[cfg(test)]
impl AppConfig {
    /// In-memory configuration for tests
    pub fn for_tests(gm_user_ids: &[&str]) -> Self {
        Self {
            server_port: 0,
            world_id: "test-world".to_string(),
            gm_user_ids: gm_user_ids.iter().map(|id| id.to_string()).collect(),
            override_store: OverrideStoreConfig {
                enabled: true,
                backend: "memory".to_string(),
                sqlite_path: String::new(),
            },
        }
    }
}
