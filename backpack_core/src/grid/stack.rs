//! Stack quantities (currency) stored in the grid

use super::GridInventory;
use crate::error::{BackpackError, Result};
use crate::item::Item;
use crate::types::ItemId;
use tracing::debug;

impl GridInventory {
    /// First stackable item with this name, scanning row-major
    pub fn find_stack(&self, name: &str) -> Option<ItemId> {
        self.coordinates()
            .filter_map(|(x, y)| self.cell(x, y))
            .find(|id| {
                self.item(*id)
                    .map(|item| item.is_stackable() && item.name() == name)
                    .unwrap_or(false)
            })
    }

    /// Quantity held in the named stack, 0 if there is none
    pub fn get_quantity(&self, name: &str) -> u32 {
        self.find_stack(name)
            .and_then(|id| self.item(id))
            .map(Item::quantity)
            .unwrap_or(0)
    }

    /// Grow the named stack, creating it with `auto_add` if missing
    ///
    /// A zero amount touches nothing and yields the existing stack, if any.
    pub fn add_quantity(&mut self, name: &str, amount: u32) -> Result<Option<ItemId>> {
        let existing = self.find_stack(name);
        if amount == 0 {
            return Ok(existing);
        }
        if let Some(id) = existing {
            let grown = self
                .item(id)
                .ok_or(BackpackError::ItemNotFound(id))?
                .add_quantity(amount)?;
            self.set_item(id, grown);
            debug!(name, amount, %id, "stack grown");
            return Ok(Some(id));
        }

        let stack = Item::gold(amount).with_name(name);
        self.auto_add(&stack).map(Some).ok_or_else(|| {
            BackpackError::InvalidPlacement(format!("no room for a new {} stack", name))
        })
    }

    /// Shrink the named stack; an emptied stack leaves the grid
    pub fn remove_quantity(&mut self, name: &str, amount: u32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let Some(id) = self.find_stack(name) else {
            return Err(BackpackError::InsufficientResource {
                name: name.to_string(),
                requested: amount,
                available: 0,
            });
        };
        let shrunk = self
            .item(id)
            .ok_or(BackpackError::ItemNotFound(id))?
            .take_quantity(amount)?;

        if shrunk.quantity() == 0 {
            self.remove(id);
        } else {
            self.set_item(id, shrunk);
        }
        debug!(name, amount, "stack spent");
        Ok(())
    }
}
