//! Shot resolution and the fog-of-war history derived from a grid.

use alloc::vec::Vec;
use log::{info, warn};

use crate::common::{Coord, GameError};
use crate::fleet::Fleet;
use crate::grid::{CellState, Grid};
use crate::ship::ShipId;

/// Result kind of one resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotKind {
    Miss,
    Hit,
    Sunk,
}

/// Outcome of one shot: kind, coordinate and the affected ship if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOutcome {
    pub kind: ShotKind,
    pub coord: Coord,
    /// Name and id of the ship hit or sunk.
    pub ship: Option<(&'static str, ShipId)>,
}

impl ShotOutcome {
    pub fn ship_name(&self) -> Option<&'static str> {
        self.ship.map(|(name, _)| name)
    }

    pub fn ship_id(&self) -> Option<ShipId> {
        self.ship.map(|(_, id)| id)
    }
}

/// Fresh grid and fleet after a shot, plus its outcome.
#[derive(Debug, Clone)]
pub struct ShotResolution {
    pub grid: Grid,
    pub fleet: Fleet,
    pub outcome: ShotOutcome,
}

/// Reject a target that is out of bounds or already resolved.
pub fn validate_target(grid: &Grid, row: usize, col: usize) -> Result<(), GameError> {
    match grid.get(row, col) {
        None => Err(GameError::OutOfBoundsTarget { row, col }),
        Some(cell) if cell.state().is_fired() => Err(GameError::AlreadyFiredTarget { row, col }),
        Some(_) => Ok(()),
    }
}

/// [`validate_target`] plus a consistency check between `grid` and `fleet`:
/// a cell owned by a ship the fleet does not contain is
/// [`GameError::UnknownShipId`] rather than water.
pub fn check_shot(grid: &Grid, fleet: &Fleet, row: usize, col: usize) -> Result<(), GameError> {
    validate_target(grid, row, col)?;
    match grid.get(row, col).and_then(|cell| cell.ship_id()) {
        Some(id) if fleet.get(id).is_none() => Err(GameError::UnknownShipId),
        _ => Ok(()),
    }
}

/// `processShot`: resolve a shot at (row, col) against copies of `grid` and
/// `fleet`, leaving the inputs untouched.
///
/// The caller guarantees (row, col) is in bounds and not yet fired upon;
/// see [`check_shot`]. Firing again at a ship cell does not add a
/// second hit entry.
pub fn process_shot(grid: &Grid, fleet: &Fleet, row: usize, col: usize) -> ShotResolution {
    let mut grid = grid.clone();
    let mut fleet = fleet.clone();
    let outcome = apply_shot(&mut grid, &mut fleet, row, col);
    ShotResolution { grid, fleet, outcome }
}

fn apply_shot(grid: &mut Grid, fleet: &mut Fleet, row: usize, col: usize) -> ShotOutcome {
    let owner = grid.get(row, col).and_then(|cell| cell.ship_id());
    let ship = owner.and_then(|id| fleet.get_mut(id));

    let Some(ship) = ship else {
        // unowned, or an owner the fleet does not know: water either way
        if owner.is_some() {
            warn!("cell ({}, {}) owned by a ship outside the fleet", row, col);
        }
        if let Some(cell) = grid.get_mut(row, col) {
            if cell.ship_id().is_none() {
                cell.mark(CellState::Miss);
            }
        }
        return ShotOutcome {
            kind: ShotKind::Miss,
            coord: (row, col),
            ship: None,
        };
    };

    ship.register_hit(row, col);
    let tag = (ship.name(), ship.id());
    if ship.is_sunk() {
        for &(r, c) in ship.positions() {
            if let Some(cell) = grid.get_mut(r, c) {
                cell.mark(CellState::Sunk);
            }
        }
        info!("{} sunk by shot at ({}, {})", ship.name(), row, col);
        ShotOutcome {
            kind: ShotKind::Sunk,
            coord: (row, col),
            ship: Some(tag),
        }
    } else {
        if let Some(cell) = grid.get_mut(row, col) {
            cell.mark(CellState::Hit);
        }
        ShotOutcome {
            kind: ShotKind::Hit,
            coord: (row, col),
            ship: Some(tag),
        }
    }
}

/// Fog-of-war view of a defending grid: every resolved coordinate split into
/// hits (including sunk-ship cells) and misses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotHistory {
    pub board_size: usize,
    pub hits: Vec<Coord>,
    pub misses: Vec<Coord>,
}

impl ShotHistory {
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            hits: Vec::new(),
            misses: Vec::new(),
        }
    }

    /// `getFiredCoordinates`, partitioned. Row-major order.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut history = ShotHistory::new(grid.side());
        for cell in grid.cells() {
            match cell.state() {
                CellState::Hit | CellState::Sunk => history.hits.push(cell.coord()),
                CellState::Miss => history.misses.push(cell.coord()),
                _ => {}
            }
        }
        history
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.hits.contains(&coord) || self.misses.contains(&coord)
    }

    pub fn fired_count(&self) -> usize {
        self.hits.len() + self.misses.len()
    }
}
