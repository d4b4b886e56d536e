//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/exero/config.toml` (XDG) or platform config dir
//! 2. Project config: `.exero.toml`
//! 3. Environment variables: `EXERO_*`
//!
//! # Intended Usage
//!
//! **Global config** (`~/.config/exero/config.toml`):
//! ```toml
//! [neo4j]
//! uri = "bolt://localhost:7687"
//! user = "neo4j"
//! password = "secret"
//! ```
//!
//! Environment variables override file values, e.g. `EXERO_NEO4J_URI` or
//! `EXERO_NEO4J_PASSWORD` for deployments that keep credentials out of
//! files entirely.

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub neo4j: Neo4jConfig,
}

/// Neo4j database configuration.
///
/// Typically defined in global config (`~/.config/exero/config.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// Bolt connection URI (required).
    /// Example: `bolt://localhost:7687`
    pub uri: String,
    /// Database user.
    pub user: String,
    /// Database password. Optional so it can come from the environment alone.
    pub password: Option<String>,
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        let user_config = Self::user_config_path();

        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(".exero.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("EXERO_").split("_"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// User config path: ~/.config/exero/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("exero").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("exero").join("config.toml"))
            .unwrap_or_default()
    }
}
