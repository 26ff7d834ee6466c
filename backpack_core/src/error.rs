//! Error taxonomy for grid, battle and expansion operations

use crate::types::ItemId;
use thiserror::Error;

/// Recoverable failure of a state-mutating call
///
/// Every operation that returns this error leaves the state it was called on
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackpackError {
    /// Out of bounds, locked cell, occupied cell, or unresolved blockers
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),
    /// Asked to take more of a stack than it holds
    #[error("insufficient {name}: requested {requested}, available {available}")]
    InsufficientResource {
        name: String,
        requested: u32,
        available: u32,
    },
    /// Acting outside the player's turn or without enough stamina
    #[error("invalid turn action: {0}")]
    InvalidTurnAction(String),
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    /// An item id that is not (or no longer) in the backpack
    #[error("item {0} is not in the backpack")]
    ItemNotFound(ItemId),
}

pub type Result<T> = std::result::Result<T, BackpackError>;
