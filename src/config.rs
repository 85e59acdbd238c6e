//! Table configuration persisted as TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Startup parameters for a session.
///
/// Fields:
/// - starting_stack / small_blind / big_blind: table stakes
/// - hands: number of hands to play
/// - bots: number of robot seats (strategies assigned round-robin)
/// - broadcast: reveal all hole cards and stack changes in the console
/// - seed: optional deck seed for reproducible sessions
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub hands: u32,
    pub bots: usize,
    pub broadcast: bool,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            starting_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            hands: 3,
            bots: 5,
            broadcast: true,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`. If the file does not exist,
    /// create it with defaults and return those.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: Config = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("creating config directory '{}'", parent.display())
                    })?;
                }
            }
            let cfg = Config::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Save the current config (overwrites).
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_text =
            toml::to_string_pretty(&self).context("serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }
}
