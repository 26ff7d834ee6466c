//! Effects resolution - Weapon damage and adjacency life bonus

use super::result::ItemEffects;
use crate::config::CombatConstants;
use crate::error::{BackpackError, Result};
use crate::grid::GridInventory;
use crate::hero::Hero;
use crate::item::Item;
use crate::types::{ItemId, SURROUNDING};

/// Damage a weapon deals given the hero's current state
///
/// The anti-tank weapon only chips for 1 while the hero holds protection;
/// every other weapon deals its attack value unmodified.
pub fn calculate_damage(weapon: &Item, hero: &Hero, combat: &CombatConstants) -> u32 {
    let base = weapon.attack_value();
    if weapon.name() == combat.anti_tank_weapon && hero.protection() > 0 {
        1
    } else {
        base
    }
}

/// 1 if any cell around the weapon holds a healing item, else 0
///
/// Presence-based: several adjacent healing items still grant 1.
pub fn calculate_life_bonus(grid: &GridInventory, weapon: ItemId) -> Result<u32> {
    if !grid.contains(weapon) {
        return Err(BackpackError::ItemNotFound(weapon));
    }

    let touches_healing = grid.cells_of(weapon).into_iter().any(|(x, y)| {
        SURROUNDING.iter().any(|&(dx, dy)| {
            grid.cell(x + dx, y + dy)
                .filter(|&id| id != weapon)
                .and_then(|id| grid.item(id))
                .map(Item::is_healing)
                .unwrap_or(false)
        })
    });

    Ok(u32::from(touches_healing))
}

/// Resolve a weapon from the hero's backpack and apply its life bonus
pub fn apply_item_effects(
    hero: &mut Hero,
    weapon: ItemId,
    combat: &CombatConstants,
) -> Result<ItemEffects> {
    let item = hero
        .inventory()
        .item(weapon)
        .ok_or(BackpackError::ItemNotFound(weapon))?;
    let damage = calculate_damage(item, hero, combat);
    let life_bonus = calculate_life_bonus(hero.inventory(), weapon)?;

    if life_bonus > 0 {
        hero.heal(life_bonus);
    }
    Ok(ItemEffects::new(damage, life_bonus))
}
