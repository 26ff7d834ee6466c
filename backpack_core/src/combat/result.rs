//! ItemEffects - Outcome of resolving one item against the backpack

use crate::error::{BackpackError, Result};
use serde::{Deserialize, Serialize};

/// Damage and life bonus produced by using a weapon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffects {
    /// Damage to deal to the targeted enemy
    pub damage: u32,
    /// Hp restored to the hero from adjacent healing items
    pub life_bonus: u32,
}

impl ItemEffects {
    pub fn new(damage: u32, life_bonus: u32) -> Self {
        ItemEffects { damage, life_bonus }
    }

    /// Build from signed values, rejecting negatives
    pub fn try_from_signed(damage: i64, life_bonus: i64) -> Result<Self> {
        let damage = u32::try_from(damage).map_err(|_| {
            BackpackError::IllegalArgument(format!("damage must be non-negative, got {}", damage))
        })?;
        let life_bonus = u32::try_from(life_bonus).map_err(|_| {
            BackpackError::IllegalArgument(format!(
                "life bonus must be non-negative, got {}",
                life_bonus
            ))
        })?;
        Ok(Self::new(damage, life_bonus))
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.damage > 0 {
            parts.push(format!("{} damage", self.damage));
        }

        if self.life_bonus > 0 {
            parts.push(format!("+{} life", self.life_bonus));
        }

        if parts.is_empty() {
            "No effect".to_string()
        } else {
            parts.join(", ")
        }
    }
}
