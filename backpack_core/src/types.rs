//! Small shared types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item stored in a backpack
///
/// Grid cells hold ids rather than items, so an item spanning several cells is
/// simply the same id written into each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Grid coordinate (column, row)
pub type Cell = (i32, i32);

/// The four edge-sharing neighbour offsets
pub const ORTHOGONAL: [Cell; 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// The eight edge- or corner-sharing neighbour offsets
pub const SURROUNDING: [Cell; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
