//! Game constants configuration

use super::ConfigError;
use crate::enemy::EnemyKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub hero: HeroConstants,
    #[serde(default)]
    pub backpack: BackpackConstants,
    #[serde(default)]
    pub enemies: EnemyConstants,
    #[serde(default)]
    pub intents: IntentWeights,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
}

impl GameConstants {
    /// Constants shipped with the crate
    pub fn bundled() -> Self {
        let toml = include_str!("../../config/game.toml");
        Self::parse(toml).unwrap_or_default()
    }

    /// Load and validate constants from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse and validate constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.max_hp == 0 || self.hero.max_stamina == 0 {
            return Err(ConfigError::ValidationError(
                "hero max_hp and max_stamina must be positive".to_string(),
            ));
        }
        if self.enemies.min_count == 0 || self.enemies.min_count > self.enemies.max_count {
            return Err(ConfigError::ValidationError(format!(
                "enemy count range {}..={} is empty",
                self.enemies.min_count, self.enemies.max_count
            )));
        }
        if self.intents.total() == 0 {
            return Err(ConfigError::ValidationError(
                "intent weights must not all be zero".to_string(),
            ));
        }
        let b = &self.backpack;
        if b.width == 0 || b.height == 0 {
            return Err(ConfigError::ValidationError(
                "backpack dimensions must be positive".to_string(),
            ));
        }
        let [x, y, w, h] = b.unlocked;
        if x < 0 || y < 0 || x + w > b.width as i32 || y + h > b.height as i32 {
            return Err(ConfigError::ValidationError(format!(
                "starting unlocked region {:?} exceeds {}x{} backpack",
                b.unlocked, b.width, b.height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroConstants {
    #[serde(default = "default_max_hp")]
    pub max_hp: u32,
    /// Stamina budget restored every player turn
    #[serde(default = "default_max_stamina")]
    pub max_stamina: u32,
}

impl Default for HeroConstants {
    fn default() -> Self {
        HeroConstants {
            max_hp: default_max_hp(),
            max_stamina: default_max_stamina(),
        }
    }
}

fn default_max_hp() -> u32 {
    40
}
fn default_max_stamina() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackpackConstants {
    #[serde(default = "default_backpack_width")]
    pub width: usize,
    #[serde(default = "default_backpack_height")]
    pub height: usize,
    /// Starting unlocked rectangle as [x, y, width, height]
    #[serde(default = "default_unlocked")]
    pub unlocked: [i32; 4],
}

impl Default for BackpackConstants {
    fn default() -> Self {
        BackpackConstants {
            width: default_backpack_width(),
            height: default_backpack_height(),
            unlocked: default_unlocked(),
        }
    }
}

fn default_backpack_width() -> usize {
    5
}
fn default_backpack_height() -> usize {
    7
}
fn default_unlocked() -> [i32; 4] {
    [1, 2, 3, 3]
}

/// Base stats of one enemy kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyStats {
    pub hp: i32,
    pub attack_damage: u32,
    /// Experience granted to the hero on defeat
    #[serde(default)]
    pub experience: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConstants {
    #[serde(default = "default_skeleton")]
    pub skeleton: EnemyStats,
    #[serde(default = "default_brute")]
    pub brute: EnemyStats,
    #[serde(default = "default_min_count")]
    pub min_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Protection an enemy gains from a Defend action
    #[serde(default = "default_defend_bonus")]
    pub defend_bonus: u32,
}

impl EnemyConstants {
    pub fn stats(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Skeleton => &self.skeleton,
            EnemyKind::Brute => &self.brute,
        }
    }
}

impl Default for EnemyConstants {
    fn default() -> Self {
        EnemyConstants {
            skeleton: default_skeleton(),
            brute: default_brute(),
            min_count: default_min_count(),
            max_count: default_max_count(),
            defend_bonus: default_defend_bonus(),
        }
    }
}

fn default_skeleton() -> EnemyStats {
    EnemyStats {
        hp: 15,
        attack_damage: 4,
        experience: 2,
    }
}
fn default_brute() -> EnemyStats {
    EnemyStats {
        hp: 30,
        attack_damage: 7,
        experience: 5,
    }
}
fn default_min_count() -> usize {
    1
}
fn default_max_count() -> usize {
    3
}
fn default_defend_bonus() -> u32 {
    2
}

/// Relative weights for enemy intent sampling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentWeights {
    #[serde(default = "default_attack_weight")]
    pub attack: u32,
    #[serde(default = "default_defend_weight")]
    pub defend: u32,
    #[serde(default = "default_malediction_weight")]
    pub malediction: u32,
}

impl IntentWeights {
    pub fn total(&self) -> u32 {
        self.attack + self.defend + self.malediction
    }
}

impl Default for IntentWeights {
    fn default() -> Self {
        IntentWeights {
            attack: default_attack_weight(),
            defend: default_defend_weight(),
            malediction: default_malediction_weight(),
        }
    }
}

fn default_attack_weight() -> u32 {
    45
}
fn default_defend_weight() -> u32 {
    45
}
fn default_malediction_weight() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Weapon name that only chips for 1 while the hero holds protection
    #[serde(default = "default_anti_tank_weapon")]
    pub anti_tank_weapon: String,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            anti_tank_weapon: default_anti_tank_weapon(),
        }
    }
}

fn default_anti_tank_weapon() -> String {
    "Anti-Tank Hammer".to_string()
}

/// What a controller hands out per defeated enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_gold_per_defeat")]
    pub gold_per_defeat: u32,
    #[serde(default = "default_unlocks_per_defeat")]
    pub unlocks_per_defeat: u32,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            gold_per_defeat: default_gold_per_defeat(),
            unlocks_per_defeat: default_unlocks_per_defeat(),
        }
    }
}

fn default_gold_per_defeat() -> u32 {
    3
}
fn default_unlocks_per_defeat() -> u32 {
    1
}
