//! Game constants and item catalog, loaded from TOML
//!
//! Both files ship with the crate under `config/` and are compiled in, so a
//! missing override file is an error while the defaults never are.

mod constants;
mod items;

pub use constants::{
    BackpackConstants, CombatConstants, EnemyConstants, EnemyStats, GameConstants, HeroConstants,
    IntentWeights, RewardConstants,
};
pub use items::{default_items, load_item_catalog, parse_item_catalog, ItemCatalog};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid game data: {0}")]
    ValidationError(String),
}

/// Read a TOML file from disk and deserialize it
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

/// Deserialize TOML text
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
