//! Common types: coordinates and the rules-engine error taxonomy.

use alloc::string::String;

/// A `(row, col)` pair, both 0-indexed.
pub type Coord = (usize, usize);

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementFault {
    /// At least one ship segment falls outside the board.
    OutOfBounds,
    /// At least one ship segment lands on a cell owned by another ship.
    Overlaps,
}

/// Errors returned by rules-engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Ship placement is out of bounds or overlaps another ship.
    InvalidPlacement(PlacementFault),
    /// Fire or targeting result outside the grid.
    OutOfBoundsTarget { row: usize, col: usize },
    /// Fire or targeting result at a cell that was already resolved.
    AlreadyFiredTarget { row: usize, col: usize },
    /// Every cell of the board has already been fired upon.
    NoValidTarget,
    /// Named ship not found in the catalog.
    UnknownShip(String),
    /// The named catalog ship is already part of the fleet.
    ShipAlreadyPlaced(&'static str),
    /// A cell references a ship id the fleet does not contain.
    UnknownShipId,
    /// The game cannot start before every catalog ship is placed.
    FleetIncomplete,
    /// Operation not allowed in the current game phase.
    WrongPhase,
    /// The other side is due to fire.
    NotYourTurn,
    /// The board cannot hold the requested fleet.
    InsufficientCapacity { needed: usize, available: usize },
    /// Board side above the supported maximum.
    BoardTooLarge { side: usize },
}

impl From<PlacementFault> for GameError {
    fn from(fault: PlacementFault) -> Self {
        GameError::InvalidPlacement(fault)
    }
}

impl core::fmt::Display for PlacementFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlacementFault::OutOfBounds => write!(f, "out of bounds"),
            PlacementFault::Overlaps => write!(f, "overlaps another ship"),
        }
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidPlacement(fault) => write!(f, "Invalid placement: {}", fault),
            GameError::OutOfBoundsTarget { row, col } => {
                write!(f, "Target ({}, {}) is outside the board", row, col)
            }
            GameError::AlreadyFiredTarget { row, col } => {
                write!(f, "Target ({}, {}) was already fired upon", row, col)
            }
            GameError::NoValidTarget => write!(f, "No unfired cell remains"),
            GameError::UnknownShip(name) => write!(f, "Ship name '{}' not found in catalog", name),
            GameError::ShipAlreadyPlaced(name) => write!(f, "{} is already placed", name),
            GameError::UnknownShipId => write!(f, "Cell references a ship missing from the fleet"),
            GameError::FleetIncomplete => write!(f, "All ships must be placed before starting"),
            GameError::WrongPhase => write!(f, "Operation not allowed in the current phase"),
            GameError::NotYourTurn => write!(f, "It is not this side's turn"),
            GameError::InsufficientCapacity { needed, available } => write!(
                f,
                "Board holds {} cells but the fleet needs {}",
                available, needed
            ),
            GameError::BoardTooLarge { side } => {
                write!(f, "Board side {} exceeds the supported maximum", side)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
