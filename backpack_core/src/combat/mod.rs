//! Combat effects - Damage and adjacency bonuses read from the backpack

mod effects;
mod result;

pub use effects::{apply_item_effects, calculate_damage, calculate_life_bonus};
pub use result::ItemEffects;
