//! Grid inventory - The shape-constrained backpack
//!
//! The grid is a `width × height` array of optional item ids plus a parallel
//! lock mask. Items live in an arena keyed by `ItemId`; a multi-cell item is
//! the same id written into each cell of its footprint.
//!
//! Invariants:
//! - every occupied cell references an id present in the arena
//! - every id in the arena owns at least one cell
//! - no placement ever writes a locked cell

mod placement;
mod stack;

use crate::error::{BackpackError, Result};
use crate::item::Item;
use crate::types::{Cell, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An item together with the anchor it was placed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: Item,
    /// Column of the bounding box's top-left corner
    pub x: i32,
    /// Row of the bounding box's top-left corner
    pub y: i32,
}

/// The hero's backpack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInventory {
    width: usize,
    height: usize,
    cells: Vec<Option<ItemId>>,
    unlocked: Vec<bool>,
    items: BTreeMap<ItemId, PlacedItem>,
    next_id: u32,
}

impl GridInventory {
    /// Create a fully locked, empty grid
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BackpackError::IllegalArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(GridInventory {
            width,
            height,
            cells: vec![None; width * height],
            unlocked: vec![false; width * height],
            items: BTreeMap::new(),
            next_id: 1,
        })
    }

    /// Create a grid with a single unlocked rectangle
    pub fn with_unlocked_rect(
        width: usize,
        height: usize,
        x: i32,
        y: i32,
        rect_width: i32,
        rect_height: i32,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        grid.unlock_rect(x, y, rect_width, rect_height)?;
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Item id stored at a cell, `None` when empty or out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<ItemId> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Out-of-bounds cells report locked
    pub fn is_unlocked(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.unlocked[i]).unwrap_or(false)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.iter().filter(|u| **u).count()
    }

    /// All coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }

    /// True when no unlocked cell is empty
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .zip(&self.unlocked)
            .all(|(cell, unlocked)| !unlocked || cell.is_some())
    }

    // === Arena access ===

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id).map(|p| &p.item)
    }

    pub fn placed(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Every stored item with its id
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().map(|(id, p)| (*id, &p.item))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Anchor the item was placed at
    pub fn position_of(&self, id: ItemId) -> Result<Cell> {
        self.items
            .get(&id)
            .map(|p| (p.x, p.y))
            .ok_or(BackpackError::ItemNotFound(id))
    }

    /// Cells currently referencing `id`, row-major
    pub fn cells_of(&self, id: ItemId) -> Vec<Cell> {
        self.coordinates()
            .filter(|&(x, y)| self.cell(x, y) == Some(id))
            .collect()
    }

    // === Lock mask ===

    pub fn unlock_cell(&mut self, x: i32, y: i32) -> Result<()> {
        let index = self.index(x, y).ok_or_else(|| {
            BackpackError::IllegalArgument(format!("cannot unlock ({}, {}): out of bounds", x, y))
        })?;
        self.unlocked[index] = true;
        Ok(())
    }

    /// Unlock several cells; nothing is unlocked if any coordinate is invalid
    pub fn unlock_cells(&mut self, cells: &[Cell]) -> Result<()> {
        if let Some(&(x, y)) = cells.iter().find(|&&(x, y)| !self.in_bounds(x, y)) {
            return Err(BackpackError::IllegalArgument(format!(
                "cannot unlock ({}, {}): out of bounds",
                x, y
            )));
        }
        for &(x, y) in cells {
            self.unlock_cell(x, y)?;
        }
        Ok(())
    }

    pub fn unlock_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        let cells: Vec<Cell> = (y..y + height)
            .flat_map(|row| (x..x + width).map(move |col| (col, row)))
            .collect();
        self.unlock_cells(&cells)
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_locked_and_empty() {
        let grid = GridInventory::new(4, 3).unwrap();
        assert_eq!(grid.unlocked_count(), 0);
        assert_eq!(grid.item_count(), 0);
        assert!(grid.cell(0, 0).is_none());
        assert!(!grid.is_unlocked(0, 0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            GridInventory::new(0, 3),
            Err(BackpackError::IllegalArgument(_))
        ));
        assert!(GridInventory::new(3, 0).is_err());
    }

    #[test]
    fn test_unlock_out_of_bounds() {
        let mut grid = GridInventory::new(3, 3).unwrap();
        assert!(grid.unlock_cell(3, 0).is_err());
        assert!(grid.unlock_cell(-1, 0).is_err());
        assert!(grid.unlock_cell(2, 2).is_ok());
        assert!(grid.is_unlocked(2, 2));
    }

    #[test]
    fn test_unlock_cells_is_all_or_nothing() {
        let mut grid = GridInventory::new(3, 3).unwrap();
        let result = grid.unlock_cells(&[(0, 0), (1, 1), (5, 5)]);
        assert!(result.is_err());
        assert_eq!(grid.unlocked_count(), 0);
    }

    #[test]
    fn test_unlocked_rect() {
        let grid = GridInventory::with_unlocked_rect(5, 7, 1, 2, 3, 3).unwrap();
        assert_eq!(grid.unlocked_count(), 9);
        assert!(grid.is_unlocked(1, 2));
        assert!(grid.is_unlocked(3, 4));
        assert!(!grid.is_unlocked(0, 2));
    }

    #[test]
    fn test_position_of_unknown_item() {
        let grid = GridInventory::new(2, 2).unwrap();
        assert_eq!(grid.position_of(ItemId(9)), Err(BackpackError::ItemNotFound(ItemId(9))));
    }
}
