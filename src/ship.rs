//! Ship definitions, identifiers and per-ship hit tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends rightward from the origin.
    Horizontal,
    /// Extends downward from the origin.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Identifier of a placed ship, unique within a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(u32);

impl ShipId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship-{}", self.0)
    }
}

/// Hands out monotonically increasing ship ids. Owned by a game session so
/// ids never depend on process-wide state.
#[derive(Debug, Clone, Default)]
pub struct ShipIdAllocator {
    next: u32,
}

impl ShipIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ShipId {
        let id = ShipId(self.next);
        self.next += 1;
        id
    }
}

/// The `size` cells a ship covers, extending rightward (horizontal) or
/// downward (vertical) from the origin. No bounds check, no wraparound.
pub fn compute_occupied_coordinates(
    row: usize,
    col: usize,
    size: usize,
    orientation: Orientation,
) -> Vec<Coord> {
    (0..size)
        .map(|i| match orientation {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        })
        .collect()
}

/// A ship placed on a grid, with the cells it covers and the cells hit so far.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    ship_type: ShipType,
    orientation: Orientation,
    row: usize,
    col: usize,
    positions: Vec<Coord>,
    hits: Vec<Coord>,
    sunk: bool,
}

impl Ship {
    /// Build a ship at (`row`, `col`) with `orientation`. Bounds and overlap
    /// are the placement validator's job; this only lays out the cells.
    pub fn new(
        id: ShipId,
        ship_type: ShipType,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Self {
        let positions = compute_occupied_coordinates(row, col, ship_type.length(), orientation);
        Ship {
            id,
            ship_type,
            orientation,
            row,
            col,
            positions,
            hits: Vec::new(),
            sunk: false,
        }
    }

    /// Record a hit at (`row`, `col`). Returns `false` when the cell is not
    /// part of this ship. Repeated hits on the same cell are not duplicated.
    pub fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        if !self.hits.contains(&(row, col)) {
            self.hits.push((row, col));
        }
        self.sunk = self.hits.len() == self.ship_type.length();
        true
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.positions.contains(&(row, col))
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn size(&self) -> usize {
        self.ship_type.length()
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells in order from the origin.
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    /// Cells hit so far, in the order they were hit.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", origin: ({}, {}), orientation: {:?}, hits: {}/{}, sunk: {} }}",
            self.id,
            self.ship_type.name(),
            self.row,
            self.col,
            self.orientation,
            self.hits.len(),
            self.ship_type.length(),
            self.sunk,
        )
    }
}
