//! backpack_core - Backpack grid and turn-based encounter core
//!
//! This library provides:
//! - Item: Immutable item values with shapes, rotation, durability and stacks
//! - GridInventory: The shape-constrained backpack with its lock mask
//! - Combat effects: Weapon damage and adjacency life bonus read from the grid
//! - Battle: The turn machine for one encounter with telegraphed enemy intents
//! - ExpansionSystem: Unlock credits spent on the backpack's frontier

pub mod battle;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod error;
pub mod expansion;
pub mod grid;
pub mod hero;
pub mod item;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use battle::{Battle, BattleOutcome, BattlePhase, EnemyAction, EnemyTurnReport, ItemUse};
pub use combat::{apply_item_effects, calculate_damage, calculate_life_bonus, ItemEffects};
pub use config::{default_items, GameConstants};
pub use enemy::{Enemy, EnemyKind};
pub use error::{BackpackError, Result};
pub use expansion::ExpansionSystem;
pub use grid::{GridInventory, PlacedItem};
pub use hero::Hero;
pub use item::{Item, ItemKind, ItemTemplate, MaledictionShape, GOLD_NAME};
pub use types::{Cell, ItemId};
