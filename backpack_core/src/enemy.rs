//! Enemy - Immutable enemy values
//!
//! Taking damage or defending yields a new `Enemy`; the battle replaces the
//! list entry by index.

use crate::config::GameConstants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two enemy tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Low hp, low damage
    Skeleton,
    /// Higher hp, higher damage
    Brute,
}

impl EnemyKind {
    /// Get all enemy kinds
    pub fn all() -> &'static [EnemyKind] {
        &[EnemyKind::Skeleton, EnemyKind::Brute]
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyKind::Skeleton => write!(f, "Skeleton"),
            EnemyKind::Brute => write!(f, "Brute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// May drop below zero on the killing blow
    pub hp: i32,
    pub attack_damage: u32,
    pub protection: u32,
    /// Experience granted on defeat
    pub experience: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, hp: i32, attack_damage: u32) -> Self {
        Enemy {
            kind,
            hp,
            attack_damage,
            protection: 0,
            experience: 0,
        }
    }

    /// Spawn an enemy with the configured stats for its kind
    pub fn spawn(kind: EnemyKind, constants: &GameConstants) -> Self {
        let stats = constants.enemies.stats(kind);
        Enemy {
            kind,
            hp: stats.hp,
            attack_damage: stats.attack_damage,
            protection: 0,
            experience: stats.experience,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Protection soaks damage first and is used up by it
    pub fn take_damage(&self, damage: u32) -> Enemy {
        let absorbed = damage.min(self.protection);
        let through = damage - absorbed;
        Enemy {
            hp: self.hp.saturating_sub(through.min(i32::MAX as u32) as i32),
            protection: self.protection - absorbed,
            ..self.clone()
        }
    }

    /// Raise guard; repeated Defends stack until damage wears them down
    pub fn defend(&self, bonus: u32) -> Enemy {
        Enemy {
            protection: self.protection.saturating_add(bonus),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_returns_new_value() {
        let skeleton = Enemy::new(EnemyKind::Skeleton, 15, 4);
        let hit = skeleton.take_damage(10);
        assert_eq!(skeleton.hp, 15);
        assert_eq!(hit.hp, 5);
        assert!(hit.is_alive());
        assert!(!hit.take_damage(10).is_alive());
    }

    #[test]
    fn test_protection_absorbs_first() {
        let guarded = Enemy::new(EnemyKind::Brute, 30, 7).defend(2);
        assert_eq!(guarded.protection, 2);

        let hit = guarded.take_damage(5);
        assert_eq!(hit.hp, 27);
        assert_eq!(hit.protection, 0);

        assert_eq!(guarded.defend(2).protection, 4);

        let chipped = guarded.take_damage(1);
        assert_eq!(chipped.hp, 30);
        assert_eq!(chipped.protection, 1);
    }

    #[test]
    fn test_spawn_uses_constants() {
        let constants = GameConstants::default();
        let brute = Enemy::spawn(EnemyKind::Brute, &constants);
        assert_eq!(brute.hp, 30);
        assert_eq!(brute.attack_damage, 7);
        assert_eq!(brute.experience, 5);
        assert_eq!(brute.protection, 0);
    }
}
