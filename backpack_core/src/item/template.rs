//! ItemTemplate - Catalog entries deserialized from TOML

use super::{Item, MaledictionShape};
use crate::error::{BackpackError, Result};
use serde::{Deserialize, Serialize};

/// Which constructor a template maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Weapon,
    Shield,
    Healing,
    Ration,
    Gold,
    Malediction,
}

/// A catalog entry describing how to build an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    /// Catalog key
    pub id: String,
    pub name: String,
    pub kind: TemplateKind,
    #[serde(default = "default_extent")]
    pub width: u32,
    #[serde(default = "default_extent")]
    pub height: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defend: u32,
    #[serde(default)]
    pub heal: u32,
    #[serde(default)]
    pub stamina_cost: u32,
    #[serde(default)]
    pub stamina_regen: u32,
    #[serde(default)]
    pub quantity: u32,
    /// Uses before breaking; absent means the kind's default
    #[serde(default)]
    pub durability: Option<u32>,
    #[serde(default)]
    pub indestructible: bool,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub shape: Option<MaledictionShape>,
}

fn default_extent() -> u32 {
    1
}

impl ItemTemplate {
    /// Build a fresh item from this template
    pub fn build(&self) -> Result<Item> {
        let item = match self.kind {
            TemplateKind::Weapon => Item::weapon(
                &self.name,
                self.attack,
                self.stamina_cost,
                self.required_durability()?,
            ),
            TemplateKind::Shield => Item::shield(
                &self.name,
                self.defend,
                self.stamina_cost,
                self.required_durability()?,
            ),
            TemplateKind::Healing => Item::healing(&self.name, self.heal),
            TemplateKind::Ration => Item::ration(&self.name, self.stamina_regen),
            TemplateKind::Gold => return Ok(Item::gold(self.quantity)),
            TemplateKind::Malediction => {
                return Ok(Item::malediction(self.shape.unwrap_or(MaledictionShape::Square)))
            }
        };

        let item = item.with_size(self.width, self.height)?.with_price(self.price);
        let item = if self.indestructible {
            item.with_durability(None)
        } else if let Some(uses) = self.durability {
            item.with_durability(Some(uses))
        } else {
            item
        };
        Ok(item)
    }

    fn required_durability(&self) -> Result<u32> {
        if self.indestructible {
            return Ok(0);
        }
        match self.durability {
            Some(uses) if uses > 0 => Ok(uses),
            _ => Err(BackpackError::IllegalArgument(format!(
                "{} needs a positive durability",
                self.id
            ))),
        }
    }
}
