//! Placement validation, interactive fleet setup and random fleet layout.

use alloc::string::ToString;
use alloc::vec::Vec;
use log::{debug, info};
use rand::Rng;

use crate::common::{Coord, GameError, PlacementFault};
use crate::config::{ship_type_by_name, MAX_BOARD_SIZE, NUM_SHIPS, SHIPS};
use crate::fleet::Fleet;
use crate::grid::{CellState, Grid};
use crate::ship::{compute_occupied_coordinates, Orientation, Ship, ShipId, ShipIdAllocator, ShipType};

/// Random origins tried for one ship before the layout starts over.
const MAX_ATTEMPTS_PER_SHIP: usize = 1_000;

/// Cells a ship would cover, or the first reason it cannot go there.
///
/// Only ownership is checked: an unowned `Preview` cell is still placeable
/// and ships may touch edge to edge.
pub fn check_placement(
    grid: &Grid,
    row: usize,
    col: usize,
    size: usize,
    orientation: Orientation,
) -> Result<Vec<Coord>, PlacementFault> {
    // far end must be on the board before any coordinate arithmetic
    let span = size.saturating_sub(1);
    let (far_row, far_col) = match orientation {
        Orientation::Horizontal => (Some(row), col.checked_add(span)),
        Orientation::Vertical => (row.checked_add(span), Some(col)),
    };
    match (far_row, far_col) {
        (Some(r), Some(c)) if grid.in_bounds(r, c) => {}
        _ if size == 0 => {}
        _ => return Err(PlacementFault::OutOfBounds),
    }
    let coords = compute_occupied_coordinates(row, col, size, orientation);
    for &(r, c) in &coords {
        match grid.get(r, c) {
            None => return Err(PlacementFault::OutOfBounds),
            Some(cell) if cell.ship_id().is_some() => return Err(PlacementFault::Overlaps),
            Some(_) => {}
        }
    }
    Ok(coords)
}

/// `canPlace`: every computed cell is in bounds and unowned.
pub fn can_place(grid: &Grid, row: usize, col: usize, size: usize, orientation: Orientation) -> bool {
    check_placement(grid, row, col, size, orientation).is_ok()
}

/// Mark the ship's cells as occupied in place. Other cells are untouched.
fn commit_ship(grid: &mut Grid, ship: &Ship) {
    for &(r, c) in ship.positions() {
        if let Some(cell) = grid.get_mut(r, c) {
            cell.occupy(ship.id());
        }
    }
}

/// `placeShipOnGrid`: a copy of `grid` with every cell of `ship` set to
/// `Ship` and owned by the ship's id.
pub fn place_ship_on_grid(grid: &Grid, ship: &Ship) -> Grid {
    let mut next = grid.clone();
    commit_ship(&mut next, ship);
    next
}

/// A copy of `grid` with stale preview marks cleared and, when the ship
/// fits, its would-be cells marked `Preview`. Only empty cells change.
pub fn preview_placement(
    grid: &Grid,
    row: usize,
    col: usize,
    size: usize,
    orientation: Orientation,
) -> Grid {
    let mut next = grid.clone();
    for cell in next.cells_mut() {
        if cell.state() == CellState::Preview {
            cell.mark(CellState::Empty);
        }
    }
    if let Ok(coords) = check_placement(grid, row, col, size, orientation) {
        for (r, c) in coords {
            if let Some(cell) = next.get_mut(r, c) {
                if cell.state() == CellState::Empty {
                    cell.mark(CellState::Preview);
                }
            }
        }
    }
    next
}

/// Returns a random valid (row, col, Orientation) for `ship_type`, sampling
/// the origin uniformly over the whole board and the orientation 50/50.
/// Gives up with `None` after a bounded number of draws.
pub fn random_placement<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    ship_type: ShipType,
) -> Option<(usize, usize, Orientation)> {
    if grid.side() == 0 {
        return None;
    }
    for _ in 0..MAX_ATTEMPTS_PER_SHIP {
        let orient = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let r = rng.random_range(0..grid.side());
        let c = rng.random_range(0..grid.side());
        if can_place(grid, r, c, ship_type.length(), orient) {
            return Some((r, c, orient));
        }
    }
    None
}

/// Reject catalogs that can never fit on a board of `side`.
fn ensure_capacity(side: usize, catalog: &[ShipType]) -> Result<(), GameError> {
    if side > MAX_BOARD_SIZE {
        return Err(GameError::BoardTooLarge { side });
    }
    let needed: usize = catalog.iter().map(ShipType::length).sum();
    let available = side * side;
    let longest = catalog.iter().map(ShipType::length).max().unwrap_or(0);
    if needed > available || longest > side {
        return Err(GameError::InsufficientCapacity { needed, available });
    }
    Ok(())
}

/// `placeAllComputerShips` for an arbitrary catalog: places every entry in
/// order at a random valid spot. A layout that paints itself into a corner
/// is discarded and started over.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    side: usize,
    catalog: &[ShipType],
    ids: &mut ShipIdAllocator,
    rng: &mut R,
) -> Result<(Grid, Fleet), GameError> {
    ensure_capacity(side, catalog)?;
    'layout: loop {
        let mut grid = Grid::new(side);
        let mut fleet = Fleet::new();
        for &def in catalog {
            let Some((r, c, orient)) = random_placement(&grid, rng, def) else {
                debug!("random layout stuck on {}, starting over", def.name());
                continue 'layout;
            };
            let ship = Ship::new(ids.allocate(), def, orient, r, c);
            commit_ship(&mut grid, &ship);
            fleet.push(ship);
        }
        return Ok((grid, fleet));
    }
}

/// Random layout of the standard catalog.
pub fn place_all_computer_ships<R: Rng + ?Sized>(
    side: usize,
    ids: &mut ShipIdAllocator,
    rng: &mut R,
) -> Result<(Grid, Fleet), GameError> {
    place_fleet_randomly(side, &SHIPS, ids, rng)
}

/// Interactive, one-ship-at-a-time setup of the standard catalog.
#[derive(Debug, Clone)]
pub struct FleetBuilder {
    grid: Grid,
    fleet: Fleet,
    placed: [bool; NUM_SHIPS],
}

impl FleetBuilder {
    pub fn new(side: usize) -> Self {
        Self {
            grid: Grid::new(side),
            fleet: Fleet::new(),
            placed: [false; NUM_SHIPS],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// First catalog entry not yet placed.
    pub fn next_unplaced(&self) -> Option<ShipType> {
        SHIPS
            .iter()
            .zip(self.placed.iter())
            .find(|(_, placed)| !**placed)
            .map(|(def, _)| *def)
    }

    pub fn is_complete(&self) -> bool {
        self.placed.iter().all(|p| *p)
    }

    /// Place the named catalog ship. On any error nothing changes.
    pub fn place(
        &mut self,
        name: &str,
        row: usize,
        col: usize,
        orientation: Orientation,
        ids: &mut ShipIdAllocator,
    ) -> Result<ShipId, GameError> {
        let def = ship_type_by_name(name).ok_or_else(|| GameError::UnknownShip(name.to_string()))?;
        let index = SHIPS
            .iter()
            .position(|s| s.name() == def.name())
            .ok_or_else(|| GameError::UnknownShip(name.to_string()))?;
        if self.placed[index] {
            return Err(GameError::ShipAlreadyPlaced(def.name()));
        }
        check_placement(&self.grid, row, col, def.length(), orientation)?;

        let ship = Ship::new(ids.allocate(), def, orientation, row, col);
        let id = ship.id();
        commit_ship(&mut self.grid, &ship);
        self.fleet.push(ship);
        self.placed[index] = true;
        info!("{} placed at ({}, {}) {:?}", def.name(), row, col, orientation);
        Ok(id)
    }

    /// Place the next unplaced ship. `None` once every ship is placed.
    pub fn place_next(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
        ids: &mut ShipIdAllocator,
    ) -> Option<Result<ShipId, GameError>> {
        let def = self.next_unplaced()?;
        Some(self.place(def.name(), row, col, orientation, ids))
    }

    /// Place every remaining ship at random. If the ships already on the
    /// board leave no room, the whole layout is redone from scratch.
    pub fn fill_randomly<R: Rng + ?Sized>(
        &mut self,
        ids: &mut ShipIdAllocator,
        rng: &mut R,
    ) -> Result<(), GameError> {
        ensure_capacity(self.grid.side(), &SHIPS)?;
        while let Some(def) = self.next_unplaced() {
            match random_placement(&self.grid, rng, def) {
                Some((r, c, orient)) => {
                    self.place(def.name(), r, c, orient, ids)?;
                }
                None => {
                    debug!("no room left for {}, redoing the layout", def.name());
                    self.reset();
                }
            }
        }
        Ok(())
    }

    /// Preview of the next unplaced ship at the given origin.
    pub fn preview(&self, row: usize, col: usize, orientation: Orientation) -> Grid {
        match self.next_unplaced() {
            Some(def) => preview_placement(&self.grid, row, col, def.length(), orientation),
            None => self.grid.clone(),
        }
    }

    /// Drop every placement and start again on an empty grid.
    pub fn reset(&mut self) {
        *self = FleetBuilder::new(self.grid.side());
    }

    pub fn into_parts(self) -> (Grid, Fleet) {
        (self.grid, self.fleet)
    }
}
