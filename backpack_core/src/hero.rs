//! Hero - The player character and the backpack it owns

use crate::config::GameConstants;
use crate::error::{BackpackError, Result};
use crate::grid::GridInventory;
use crate::item::GOLD_NAME;
use serde::{Deserialize, Serialize};

/// Player state carried across encounters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    hp: u32,
    max_hp: u32,
    stamina: u32,
    max_stamina: u32,
    /// Flat damage absorption, cleared after every enemy turn
    protection: u32,
    experience: u32,
    inventory: GridInventory,
}

impl Hero {
    /// Create a hero at full health and stamina
    pub fn new(max_hp: u32, max_stamina: u32, inventory: GridInventory) -> Result<Self> {
        if max_hp == 0 || max_stamina == 0 {
            return Err(BackpackError::IllegalArgument(format!(
                "hero needs positive max hp and stamina, got {} and {}",
                max_hp, max_stamina
            )));
        }
        Ok(Hero {
            hp: max_hp,
            max_hp,
            stamina: max_stamina,
            max_stamina,
            protection: 0,
            experience: 0,
            inventory,
        })
    }

    /// Create a hero with the configured stats and starting backpack
    pub fn from_constants(constants: &GameConstants) -> Result<Self> {
        let b = &constants.backpack;
        let [x, y, w, h] = b.unlocked;
        let inventory = GridInventory::with_unlocked_rect(b.width, b.height, x, y, w, h)?;
        Self::new(constants.hero.max_hp, constants.hero.max_stamina, inventory)
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> u32 {
        self.max_stamina
    }

    pub fn protection(&self) -> u32 {
        self.protection
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn inventory(&self) -> &GridInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut GridInventory {
        &mut self.inventory
    }

    /// Gold held in the backpack
    pub fn gold(&self) -> u32 {
        self.inventory.get_quantity(GOLD_NAME)
    }

    // === Stamina ===

    pub fn has_stamina(&self, cost: u32) -> bool {
        self.stamina >= cost
    }

    pub fn spend_stamina(&mut self, cost: u32) -> Result<()> {
        if !self.has_stamina(cost) {
            return Err(BackpackError::InvalidTurnAction(format!(
                "needs {} stamina, has {}",
                cost, self.stamina
            )));
        }
        self.stamina -= cost;
        Ok(())
    }

    /// Restore stamina, capped at the maximum
    pub fn regen_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_add(amount).min(self.max_stamina);
    }

    pub fn reset_stamina(&mut self) {
        self.stamina = self.max_stamina;
    }

    // === Health ===

    /// Heal up to max hp, returning the amount actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Take a hit reduced flatly by protection; returns damage dealt to hp
    pub fn take_hit(&mut self, damage: u32) -> u32 {
        let dealt = damage.saturating_sub(self.protection).min(self.hp);
        self.hp -= dealt;
        dealt
    }

    pub fn add_protection(&mut self, amount: u32) {
        self.protection = self.protection.saturating_add(amount);
    }

    pub fn reset_protection(&mut self) {
        self.protection = 0;
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Hero {
        Hero::new(40, 3, GridInventory::new(3, 3).unwrap()).unwrap()
    }

    #[test]
    fn test_zero_max_rejected() {
        assert!(Hero::new(0, 3, GridInventory::new(1, 1).unwrap()).is_err());
        assert!(Hero::new(10, 0, GridInventory::new(1, 1).unwrap()).is_err());
    }

    #[test]
    fn test_protection_absorbs_flat() {
        let mut hero = hero();
        hero.add_protection(3);
        assert_eq!(hero.take_hit(5), 2);
        assert_eq!(hero.take_hit(2), 0);
        assert_eq!(hero.hp(), 38);
        assert_eq!(hero.protection(), 3, "protection is not consumed by hits");
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let mut hero = hero();
        assert_eq!(hero.take_hit(100), 40);
        assert_eq!(hero.hp(), 0);
        assert!(!hero.is_alive());
    }

    #[test]
    fn test_heal_is_capped() {
        let mut hero = hero();
        hero.take_hit(5);
        assert_eq!(hero.heal(10), 5);
        assert_eq!(hero.hp(), 40);
    }

    #[test]
    fn test_stamina_spend_and_regen() {
        let mut hero = hero();
        assert!(hero.spend_stamina(2).is_ok());
        assert!(!hero.has_stamina(2));
        assert!(matches!(
            hero.spend_stamina(2),
            Err(BackpackError::InvalidTurnAction(_))
        ));
        assert_eq!(hero.stamina(), 1);
        hero.regen_stamina(5);
        assert_eq!(hero.stamina(), 3);
    }

    #[test]
    fn test_from_constants() {
        let hero = Hero::from_constants(&GameConstants::default()).unwrap();
        assert_eq!(hero.max_hp(), 40);
        assert_eq!(hero.inventory().unlocked_count(), 9);
        assert_eq!(hero.gold(), 0);
    }
}
