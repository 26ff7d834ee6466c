//! Turn phases and per-action reports

use serde::{Deserialize, Serialize};

/// Where the encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    Init,
    AnnounceEnemyTurn,
    PlayerTurnActive,
    PlayerTurnEnded,
    EnemyTurnExecuting,
    Won,
    Lost,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Won | BattlePhase::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// Result of a successful `use_item`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUse {
    /// Damage dealt to the front enemy
    pub damage: u32,
    /// Hp restored from adjacent healing items
    pub life_bonus: u32,
    /// Hp restored by the item itself
    pub healed: u32,
    /// Protection added to the hero
    pub protection: u32,
    pub enemy_defeated: bool,
    /// The item broke and left the backpack
    pub item_broken: bool,
}

/// What the enemies did on their turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTurnReport {
    /// Hp the hero lost after protection
    pub damage_taken: u32,
    /// Damage protection soaked up
    pub damage_absorbed: u32,
    /// Enemies that raised their guard
    pub defends: usize,
    /// Curses the controller should insert into the backpack
    pub maledictions: u32,
}

impl EnemyTurnReport {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.damage_taken > 0 {
            parts.push(format!("{} damage taken", self.damage_taken));
        }

        if self.damage_absorbed > 0 {
            parts.push(format!("{} absorbed", self.damage_absorbed));
        }

        if self.defends > 0 {
            parts.push(format!("{} defending", self.defends));
        }

        if self.maledictions > 0 {
            parts.push(format!("{} malediction(s)", self.maledictions));
        }

        if parts.is_empty() {
            "Nothing happened".to_string()
        } else {
            parts.join(", ")
        }
    }
}
