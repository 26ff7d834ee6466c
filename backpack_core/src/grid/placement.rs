//! Placement, removal and auto-fit

use super::{GridInventory, PlacedItem};
use crate::error::{BackpackError, Result};
use crate::item::Item;
use crate::types::ItemId;
use std::collections::BTreeSet;
use tracing::debug;

impl GridInventory {
    /// Every covered cell is in bounds, unlocked and empty
    pub fn can_place(&self, item: &Item, x: i32, y: i32) -> bool {
        item.footprint().all(|(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            self.is_unlocked(cx, cy) && self.cell(cx, cy).is_none()
        })
    }

    /// Like `can_place` but ignores what currently occupies the cells
    pub fn can_force_place(&self, item: &Item, x: i32, y: i32) -> bool {
        item.footprint()
            .all(|(dx, dy)| self.is_unlocked(x + dx, y + dy))
    }

    /// Distinct items sitting where the placement would go, regardless of locks
    pub fn blocking_items(&self, item: &Item, x: i32, y: i32) -> BTreeSet<ItemId> {
        item.footprint()
            .filter_map(|(dx, dy)| self.cell(x + dx, y + dy))
            .collect()
    }

    /// Place a copy of `item` with its top-left corner at (x, y)
    ///
    /// Returns the new id, or `None` with the grid untouched.
    pub fn place(&mut self, item: &Item, x: i32, y: i32) -> Option<ItemId> {
        if !self.can_place(item, x, y) {
            return None;
        }
        let id = self.allocate_id();
        self.write(id, item.clone(), x, y);
        debug!(item = %item.name(), %id, x, y, "placed item");
        Some(id)
    }

    /// Place onto unlocked cells once the caller has cleared every blocker
    pub fn force_place(&mut self, item: &Item, x: i32, y: i32) -> Result<ItemId> {
        if !self.can_force_place(item, x, y) {
            return Err(BackpackError::InvalidPlacement(format!(
                "{} does not fit unlocked cells at ({}, {})",
                item.name(), x, y
            )));
        }
        let blockers = self.blocking_items(item, x, y);
        if !blockers.is_empty() {
            return Err(BackpackError::InvalidPlacement(format!(
                "{} at ({}, {}) is blocked by {} item(s)",
                item.name(),
                x,
                y,
                blockers.len()
            )));
        }
        let id = self.allocate_id();
        self.write(id, item.clone(), x, y);
        debug!(item = %item.name(), %id, x, y, "force-placed item");
        Ok(id)
    }

    /// Put an item wherever it first fits
    ///
    /// Stackable items merge into an existing stack of the same name first.
    /// Otherwise cells are scanned row-major, trying the item as given and
    /// then rotated. On `None` the grid is unchanged.
    pub fn auto_add(&mut self, item: &Item) -> Option<ItemId> {
        if item.is_stackable() {
            if let Some(id) = self.find_stack(item.name()) {
                let merged = self.items.get(&id)?.item.add_quantity(item.quantity()).ok()?;
                debug!(item = %item.name(), %id, quantity = merged.quantity(), "merged stack");
                self.set_item(id, merged);
                return Some(id);
            }
        }

        let rotated = item.rotate();
        for (x, y) in self.coordinates().collect::<Vec<_>>() {
            if let Some(id) = self.place(item, x, y) {
                return Some(id);
            }
            if item.is_rotatable() {
                if let Some(id) = self.place(&rotated, x, y) {
                    return Some(id);
                }
            }
        }
        debug!(item = %item.name(), "backpack full");
        None
    }

    /// Clear every cell referencing `id` and return the item
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let placed = self.items.remove(&id)?;
        for cell in self.cells.iter_mut().filter(|c| **c == Some(id)) {
            *cell = None;
        }
        debug!(item = %placed.item.name(), %id, "removed item");
        Some(placed.item)
    }

    /// Swap the stored value for `id`, keeping its footprint; `None` removes it
    pub fn update_item(&mut self, id: ItemId, item: Option<Item>) -> Result<()> {
        if !self.contains(id) {
            return Err(BackpackError::ItemNotFound(id));
        }
        match item {
            Some(item) => self.set_item(id, item),
            None => {
                self.remove(id);
            }
        }
        Ok(())
    }

    /// Move an item to a new anchor, keeping its id and orientation
    pub fn move_item(&mut self, id: ItemId, x: i32, y: i32) -> Result<()> {
        let item = self.item(id).cloned().ok_or(BackpackError::ItemNotFound(id))?;
        self.relocate(id, item, x, y)
    }

    /// Move an item to a new anchor in the other orientation
    pub fn move_rotated(&mut self, id: ItemId, x: i32, y: i32) -> Result<()> {
        let item = self
            .item(id)
            .map(Item::rotate)
            .ok_or(BackpackError::ItemNotFound(id))?;
        self.relocate(id, item, x, y)
    }

    fn relocate(&mut self, id: ItemId, item: Item, x: i32, y: i32) -> Result<()> {
        let footprint = self.cells_of(id);
        for &(cx, cy) in &footprint {
            if let Some(i) = self.index(cx, cy) {
                self.cells[i] = None;
            }
        }

        if self.can_place(&item, x, y) {
            self.write(id, item, x, y);
            debug!(%id, x, y, "moved item");
            return Ok(());
        }

        for &(cx, cy) in &footprint {
            if let Some(i) = self.index(cx, cy) {
                self.cells[i] = Some(id);
            }
        }
        Err(BackpackError::InvalidPlacement(format!(
            "cannot move {} to ({}, {})",
            id, x, y
        )))
    }

    fn write(&mut self, id: ItemId, item: Item, x: i32, y: i32) {
        for (dx, dy) in item.footprint() {
            if let Some(i) = self.index(x + dx, y + dy) {
                self.cells[i] = Some(id);
            }
        }
        self.items.insert(id, PlacedItem { item, x, y });
    }

    pub(super) fn set_item(&mut self, id: ItemId, item: Item) {
        if let Some(placed) = self.items.get_mut(&id) {
            placed.item = item;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BackpackError;
    use crate::grid::GridInventory;
    use crate::item::{Item, MaledictionShape};

    fn open_grid(width: usize, height: usize) -> GridInventory {
        GridInventory::with_unlocked_rect(width, height, 0, 0, width as i32, height as i32).unwrap()
    }

    #[test]
    fn test_place_writes_every_cell() {
        let mut grid = open_grid(4, 4);
        let sword = Item::weapon("Sword", 5, 1, 3).with_size(1, 3).unwrap();
        assert!(grid.can_place(&sword, 2, 1));

        let id = grid.place(&sword, 2, 1).unwrap();
        assert!(grid.contains(id));
        assert_eq!(grid.cells_of(id), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(grid.position_of(id).unwrap(), (2, 1));
    }

    #[test]
    fn test_place_rejects_locked_occupied_and_out_of_bounds() {
        let mut grid = GridInventory::with_unlocked_rect(4, 4, 0, 0, 2, 2).unwrap();
        let block = Item::shield("Tower", 3, 1, 3).with_size(2, 2).unwrap();

        assert!(!grid.can_place(&block, 1, 1), "locked cells");
        assert!(!grid.can_place(&block, -1, 0), "out of bounds");
        assert!(grid.place(&block, 0, 0).is_some());
        assert!(grid.place(&Item::healing("Herb", 1), 1, 1).is_none(), "occupied");
    }

    #[test]
    fn test_malediction_gap_is_usable() {
        let mut grid = open_grid(4, 2);
        let curse = Item::malediction(MaledictionShape::Serpent);
        grid.place(&curse, 0, 0).unwrap();
        assert!(grid.place(&Item::healing("Herb", 1), 0, 1).is_some());
        assert!(grid.place(&Item::healing("Herb", 1), 2, 0).is_some());
        assert!(!grid.is_full());
    }

    #[test]
    fn test_blocking_items_and_force_place() {
        let mut grid = open_grid(3, 3);
        let herb = grid.place(&Item::healing("Herb", 1), 1, 1).unwrap();
        let bread = grid.place(&Item::ration("Bread", 1), 0, 0).unwrap();
        let curse = Item::malediction(MaledictionShape::Square);

        let blockers = grid.blocking_items(&curse, 0, 0);
        assert_eq!(blockers.into_iter().collect::<Vec<_>>(), vec![herb, bread]);
        assert!(grid.can_force_place(&curse, 0, 0));
        assert!(matches!(
            grid.force_place(&curse, 0, 0),
            Err(BackpackError::InvalidPlacement(_))
        ));

        grid.remove(herb);
        grid.remove(bread);
        let id = grid.force_place(&curse, 0, 0).unwrap();
        assert_eq!(grid.cells_of(id).len(), 4);
    }

    #[test]
    fn test_force_place_needs_unlocked_cells() {
        let mut grid = GridInventory::with_unlocked_rect(3, 3, 0, 0, 1, 1).unwrap();
        let curse = Item::malediction(MaledictionShape::Square);
        assert!(!grid.can_force_place(&curse, 0, 0));
        assert!(grid.force_place(&curse, 0, 0).is_err());
    }

    #[test]
    fn test_auto_add_row_major_and_rotation() {
        let mut grid = open_grid(3, 2);
        grid.place(&Item::healing("Herb", 1), 0, 0).unwrap();

        // A 1x3 spear only fits lying down on the bottom row
        let spear = Item::weapon("Spear", 4, 1, 3).with_size(1, 3).unwrap();
        let id = grid.auto_add(&spear).unwrap();
        assert!(grid.item(id).unwrap().is_rotated());
        assert_eq!(grid.position_of(id).unwrap(), (0, 1));
    }

    #[test]
    fn test_auto_add_full_leaves_grid_unchanged() {
        let mut grid = open_grid(2, 2);
        grid.place(&Item::healing("Herb", 1), 0, 0).unwrap();
        let before = grid.clone();

        let block = Item::shield("Tower", 3, 1, 3).with_size(2, 2).unwrap();
        assert!(grid.auto_add(&block).is_none());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_auto_add_merges_stacks() {
        let mut grid = open_grid(3, 3);
        let first = grid.auto_add(&Item::gold(5)).unwrap();
        let second = grid.auto_add(&Item::gold(7)).unwrap();
        assert_eq!(first, second);
        assert_eq!(grid.item(first).unwrap().quantity(), 12);
        assert_eq!(grid.item_count(), 1);
    }

    #[test]
    fn test_remove_clears_cells() {
        let mut grid = open_grid(3, 3);
        let id = grid.place(&Item::weapon("Club", 3, 1, 2).with_size(2, 1).unwrap(), 0, 0).unwrap();
        assert!(grid.remove(id).is_some());
        assert!(grid.cell(0, 0).is_none());
        assert!(grid.cell(1, 0).is_none());
        assert!(grid.remove(id).is_none());
    }

    #[test]
    fn test_update_item_keeps_footprint() {
        let mut grid = open_grid(3, 3);
        let club = Item::weapon("Club", 3, 1, 2).with_size(2, 1).unwrap();
        let id = grid.place(&club, 0, 2).unwrap();

        grid.update_item(id, Some(club.decrease_durability())).unwrap();
        assert_eq!(grid.item(id).unwrap().durability(), Some(1));
        assert_eq!(grid.cells_of(id), vec![(0, 2), (1, 2)]);

        grid.update_item(id, None).unwrap();
        assert!(!grid.contains(id));
        assert!(grid.update_item(id, None).is_err());
    }

    #[test]
    fn test_move_item_restores_on_failure() {
        let mut grid = open_grid(3, 3);
        let club = Item::weapon("Club", 3, 1, 2).with_size(2, 1).unwrap();
        let id = grid.place(&club, 0, 0).unwrap();
        grid.place(&Item::healing("Herb", 1), 2, 2).unwrap();

        // Overlapping its own old footprint is fine
        grid.move_item(id, 1, 0).unwrap();
        assert_eq!(grid.cells_of(id), vec![(1, 0), (2, 0)]);

        let before = grid.clone();
        assert!(grid.move_item(id, 1, 2).is_err());
        assert_eq!(grid, before);

        grid.move_rotated(id, 0, 1).unwrap();
        assert_eq!(grid.cells_of(id), vec![(0, 1), (0, 2)]);
        assert!(grid.item(id).unwrap().is_rotated());
    }
}
