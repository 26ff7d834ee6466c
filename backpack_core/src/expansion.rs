//! Backpack expansion - Spending unlock credits on the grid's frontier

use crate::grid::GridInventory;
use crate::types::{Cell, ORTHOGONAL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Unlock credits and the cells they can currently be spent on
///
/// Persists across encounters; the frontier is recomputed from the grid
/// whenever credits change or a cell is unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSystem {
    pending_unlocks: u32,
    frontier: BTreeSet<Cell>,
}

impl ExpansionSystem {
    pub fn new(grid: &GridInventory) -> Self {
        let mut system = ExpansionSystem::default();
        system.refresh(grid);
        system
    }

    pub fn pending_unlocks(&self) -> u32 {
        self.pending_unlocks
    }

    /// Locked cells that may be unlocked right now
    pub fn frontier(&self) -> &BTreeSet<Cell> {
        &self.frontier
    }

    pub fn is_expansion_available(&self) -> bool {
        self.pending_unlocks > 0 && !self.frontier.is_empty()
    }

    /// Grant unlock credits (e.g. for a defeated enemy)
    pub fn add_pending_unlocks(&mut self, amount: u32, grid: &GridInventory) {
        self.pending_unlocks = self.pending_unlocks.saturating_add(amount);
        self.refresh(grid);
    }

    /// Recompute the frontier from the grid's lock mask
    pub fn refresh(&mut self, grid: &GridInventory) {
        self.frontier = compute_frontier(grid);
        debug!(
            credits = self.pending_unlocks,
            frontier = self.frontier.len(),
            "frontier recomputed"
        );
    }

    /// Spend one credit on a frontier cell; false leaves everything unchanged
    ///
    /// The frontier is recomputed first, so cells unlocked directly on the
    /// grid since the last refresh are never paid for.
    pub fn unlock_cell(&mut self, grid: &mut GridInventory, x: i32, y: i32) -> bool {
        if self.pending_unlocks == 0 {
            return false;
        }
        self.refresh(grid);
        if !self.frontier.contains(&(x, y)) {
            return false;
        }
        if grid.unlock_cell(x, y).is_err() {
            return false;
        }
        self.pending_unlocks -= 1;
        debug!(x, y, credits = self.pending_unlocks, "backpack expanded");
        self.refresh(grid);
        true
    }
}

/// Locked cells touching the unlocked region along an edge that still border
/// the outside or another locked cell
pub fn compute_frontier(grid: &GridInventory) -> BTreeSet<Cell> {
    grid.coordinates()
        .filter(|&(x, y)| !grid.is_unlocked(x, y))
        .filter(|&(x, y)| {
            let neighbours = ORTHOGONAL.map(|(dx, dy)| (x + dx, y + dy));
            let touches_unlocked = neighbours.iter().any(|&(nx, ny)| grid.is_unlocked(nx, ny));
            let on_perimeter = neighbours
                .iter()
                .any(|&(nx, ny)| !grid.in_bounds(nx, ny) || !grid.is_unlocked(nx, ny));
            touches_unlocked && on_perimeter
        })
        .collect()
}
