//! Run configuration for the `pacman` binary.
//!
//! Settings come from a TOML file (explicit `--config`, or `pacman.toml` in the
//! working directory when present) and are then overridden by command-line flags.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use pacman_agents::AgentConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "pacman.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub agent: AgentConfig,
    /// Built-in layout name or path to a layout file
    pub layout: String,
    pub games: u32,
    /// Pacman moves before a game is abandoned
    pub max_moves: u32,
    pub ghost_seed: Option<u64>,
    pub render: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            layout: "small".to_string(),
            games: 1,
            max_moves: 500,
            ghost_seed: None,
            render: true,
        }
    }
}

impl RunConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid run configuration")
    }

    /// Loads an explicitly requested file. Any failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolves the configuration to start from.
    /// A malformed `pacman.toml` found by discovery falls back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Ok(Self::default())
            }
        }
    }
}
