//! Item model - Immutable item values with shape, stats and durability
//!
//! Every operation returns a new `Item`; nothing here mutates in place. The
//! grid swaps its stored value with `GridInventory::update_item`.

mod kind;
mod template;

pub use kind::{ItemKind, MaledictionShape};
pub use template::{ItemTemplate, TemplateKind};

use crate::error::{BackpackError, Result};
use serde::{Deserialize, Serialize};

/// Name given to currency stacks
pub const GOLD_NAME: &str = "Gold";
/// Name given to curse items
pub const MALEDICTION_NAME: &str = "Malediction";

/// A single backpack item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name; stacks merge on this
    name: String,
    kind: ItemKind,
    /// Effective width (already swapped if rotated)
    width: u32,
    /// Effective height (already swapped if rotated)
    height: u32,
    rotated: bool,
    /// Remaining uses, `None` when indestructible
    durability: Option<u32>,
    sellable: bool,
    price: u32,
}

impl Item {
    fn base(name: impl Into<String>, kind: ItemKind, durability: Option<u32>) -> Self {
        Item {
            name: name.into(),
            kind,
            width: 1,
            height: 1,
            rotated: false,
            durability,
            sellable: true,
            price: 0,
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        attack: u32,
        stamina_cost: u32,
        durability: u32,
    ) -> Self {
        Self::base(name, ItemKind::Weapon { attack, stamina_cost }, Some(durability))
    }

    pub fn shield(
        name: impl Into<String>,
        defend: u32,
        stamina_cost: u32,
        durability: u32,
    ) -> Self {
        Self::base(name, ItemKind::Shield { defend, stamina_cost }, Some(durability))
    }

    /// Healing consumable (single use unless overridden with `with_durability`)
    pub fn healing(name: impl Into<String>, heal: u32) -> Self {
        Self::base(name, ItemKind::Healing { heal }, Some(1))
    }

    /// Stamina consumable (single use unless overridden with `with_durability`)
    pub fn ration(name: impl Into<String>, stamina_regen: u32) -> Self {
        Self::base(name, ItemKind::Ration { stamina_regen }, Some(1))
    }

    /// A gold stack worth one per coin
    pub fn gold(quantity: u32) -> Self {
        let mut item = Self::base(GOLD_NAME, ItemKind::Gold { quantity }, None);
        item.price = 1;
        item
    }

    /// An indestructible, unsellable curse with the given footprint
    pub fn malediction(shape: MaledictionShape) -> Self {
        let (width, height) = shape.dimensions();
        let mut item = Self::base(MALEDICTION_NAME, ItemKind::Malediction { shape }, None);
        item.width = width;
        item.height = height;
        item.sellable = false;
        item
    }

    /// Resize the bounding box; maledictions keep their canonical size
    pub fn with_size(mut self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BackpackError::IllegalArgument(format!(
                "item size must be positive, got {}x{}",
                width, height
            )));
        }
        if matches!(self.kind, ItemKind::Malediction { .. }) {
            return Ok(self);
        }
        if self.rotated {
            self.width = height;
            self.height = width;
        } else {
            self.width = width;
            self.height = height;
        }
        Ok(self)
    }

    /// Override durability (`None` = indestructible)
    pub fn with_durability(mut self, durability: Option<u32>) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    /// Same item under another name (stacks merge by name)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    // === Shape ===

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Gold and maledictions never rotate
    pub fn is_rotatable(&self) -> bool {
        !matches!(self.kind, ItemKind::Gold { .. } | ItemKind::Malediction { .. })
    }

    /// Whether the item covers local offset (dx, dy) of its bounding box
    pub fn occupies(&self, dx: i32, dy: i32) -> bool {
        if dx < 0 || dy < 0 || dx >= self.width as i32 || dy >= self.height as i32 {
            return false;
        }
        match self.kind {
            ItemKind::Malediction { shape } => shape.covers(dx, dy),
            _ => true,
        }
    }

    /// All covered local offsets, row-major
    pub fn footprint(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height as i32)
            .flat_map(move |dy| (0..self.width as i32).map(move |dx| (dx, dy)))
            .filter(move |&(dx, dy)| self.occupies(dx, dy))
    }

    /// Orientation toggled, width and height swapped
    pub fn rotate(&self) -> Item {
        let mut rotated = self.clone();
        if self.is_rotatable() {
            rotated.rotated = !self.rotated;
            rotated.width = self.height;
            rotated.height = self.width;
        }
        rotated
    }

    // === Durability ===

    pub fn durability(&self) -> Option<u32> {
        self.durability
    }

    pub fn is_indestructible(&self) -> bool {
        self.durability.is_none()
    }

    /// One use consumed, clamped at zero; indestructible items are unchanged
    pub fn decrease_durability(&self) -> Item {
        let mut worn = self.clone();
        worn.durability = self.durability.map(|d| d.saturating_sub(1));
        worn
    }

    /// Broken items must be removed from the grid by the caller
    pub fn is_broken(&self) -> bool {
        self.durability == Some(0)
    }

    // === Stats ===

    pub fn attack_value(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { attack, .. } => attack,
            _ => 0,
        }
    }

    pub fn defend_value(&self) -> u32 {
        match self.kind {
            ItemKind::Shield { defend, .. } => defend,
            _ => 0,
        }
    }

    pub fn heal_amount(&self) -> u32 {
        match self.kind {
            ItemKind::Healing { heal } => heal,
            _ => 0,
        }
    }

    pub fn stamina_cost(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { stamina_cost, .. } | ItemKind::Shield { stamina_cost, .. } => {
                stamina_cost
            }
            _ => 0,
        }
    }

    pub fn stamina_regen(&self) -> u32 {
        match self.kind {
            ItemKind::Ration { stamina_regen } => stamina_regen,
            _ => 0,
        }
    }

    /// Counts toward the adjacency life bonus of weapons
    pub fn is_healing(&self) -> bool {
        matches!(self.kind, ItemKind::Healing { .. })
    }

    pub fn is_malediction(&self) -> bool {
        matches!(self.kind, ItemKind::Malediction { .. })
    }

    // === Stacking ===

    pub fn is_stackable(&self) -> bool {
        matches!(self.kind, ItemKind::Gold { .. })
    }

    /// Stack size; 1 for anything that does not stack
    pub fn quantity(&self) -> u32 {
        match self.kind {
            ItemKind::Gold { quantity } => quantity,
            _ => 1,
        }
    }

    /// Stacks merge by name, never by identity
    pub fn same_stack(&self, other: &Item) -> bool {
        self.is_stackable() && other.is_stackable() && self.name == other.name
    }

    /// A stack holding `amount` more
    pub fn add_quantity(&self, amount: u32) -> Result<Item> {
        match self.kind {
            ItemKind::Gold { quantity } => {
                let quantity = quantity.checked_add(amount).ok_or_else(|| {
                    BackpackError::IllegalArgument(format!("{} stack overflow", self.name))
                })?;
                let mut stack = self.clone();
                stack.kind = ItemKind::Gold { quantity };
                Ok(stack)
            }
            _ => Err(BackpackError::IllegalArgument(format!(
                "{} is not stackable",
                self.name
            ))),
        }
    }

    /// A stack holding `amount` less
    pub fn take_quantity(&self, amount: u32) -> Result<Item> {
        match self.kind {
            ItemKind::Gold { quantity } if quantity >= amount => {
                let mut stack = self.clone();
                stack.kind = ItemKind::Gold { quantity: quantity - amount };
                Ok(stack)
            }
            ItemKind::Gold { quantity } => Err(BackpackError::InsufficientResource {
                name: self.name.clone(),
                requested: amount,
                available: quantity,
            }),
            _ => Err(BackpackError::IllegalArgument(format!(
                "{} is not stackable",
                self.name
            ))),
        }
    }

    // === Trade ===

    pub fn is_sellable(&self) -> bool {
        self.sellable
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    /// What a merchant would pay for the whole item or stack
    pub fn sale_value(&self) -> u32 {
        if !self.sellable {
            return 0;
        }
        self.price.saturating_mul(self.quantity())
    }
}
