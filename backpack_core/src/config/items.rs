//! Item catalog loading

use super::ConfigError;
use crate::item::ItemTemplate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for item templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    #[serde(rename = "items")]
    pub items: Vec<ItemTemplate>,
}

fn into_map(catalog: ItemCatalog) -> Result<HashMap<String, ItemTemplate>, ConfigError> {
    let mut map = HashMap::new();
    for template in catalog.items {
        template
            .build()
            .map_err(|e| ConfigError::ValidationError(format!("{}: {}", template.id, e)))?;
        map.insert(template.id.clone(), template);
    }
    Ok(map)
}

/// Load item templates from a TOML file
pub fn load_item_catalog(path: &Path) -> Result<HashMap<String, ItemTemplate>, ConfigError> {
    let catalog: ItemCatalog = super::load_toml(path)?;
    into_map(catalog)
}

/// Load item templates from a TOML string
pub fn parse_item_catalog(content: &str) -> Result<HashMap<String, ItemTemplate>, ConfigError> {
    let catalog: ItemCatalog = super::parse_toml(content)?;
    into_map(catalog)
}

/// Get the bundled item catalog
pub fn default_items() -> HashMap<String, ItemTemplate> {
    let toml = include_str!("../../config/items.toml");
    parse_item_catalog(toml).unwrap_or_default()
}
