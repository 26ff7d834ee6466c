//! Prelude module for convenient imports
//!
//! ```rust
//! use backpack_core::prelude::*;
//! ```

// Items and backpack
pub use crate::grid::GridInventory;
pub use crate::item::{Item, ItemKind, MaledictionShape, GOLD_NAME};
pub use crate::types::{Cell, ItemId};

// Actors
pub use crate::enemy::{Enemy, EnemyKind};
pub use crate::hero::Hero;

// Encounter
pub use crate::battle::{Battle, BattleOutcome, BattlePhase, EnemyAction, EnemyTurnReport, ItemUse};
pub use crate::combat::ItemEffects;
pub use crate::expansion::ExpansionSystem;

// Config and errors
pub use crate::config::{default_items, GameConstants};
pub use crate::error::{BackpackError, Result};
