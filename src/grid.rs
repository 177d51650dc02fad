//! Square grid of cells with per-cell state and owning ship.
//!
//! A `Grid` is plain data: placement and shot resolution decide what to write,
//! the grid only guards bounds and the cell invariant (a cell carries an owning
//! ship id exactly when its state is `Ship`, `Hit` or `Sunk`).

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;
use crate::ship::ShipId;

/// State tag of one grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    /// Occupied by an intact ship segment.
    Ship,
    Hit,
    Miss,
    Sunk,
    /// Transient placement preview, never owned by a ship.
    Preview,
}

impl CellState {
    /// True once a shot has resolved on this cell.
    pub fn is_fired(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss | CellState::Sunk)
    }

    fn glyph(self) -> char {
        match self {
            CellState::Empty => '·',
            CellState::Ship => '■',
            CellState::Hit => 'X',
            CellState::Miss => 'o',
            CellState::Sunk => '#',
            CellState::Preview => '□',
        }
    }
}

/// One grid square. Position is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    state: CellState,
    ship_id: Option<ShipId>,
}

impl Cell {
    fn empty(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            state: CellState::Empty,
            ship_id: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Owning ship, present iff the state is `Ship`, `Hit` or `Sunk`.
    pub fn ship_id(&self) -> Option<ShipId> {
        self.ship_id
    }

    pub(crate) fn occupy(&mut self, id: ShipId) {
        self.state = CellState::Ship;
        self.ship_id = Some(id);
    }

    /// Change the state tag of an owned cell, or of an unowned cell to a
    /// state that carries no owner.
    pub(crate) fn mark(&mut self, state: CellState) {
        debug_assert_eq!(
            self.ship_id.is_some(),
            matches!(state, CellState::Ship | CellState::Hit | CellState::Sunk),
            "cell ({}, {}) would break the owner invariant",
            self.row,
            self.col
        );
        self.state = state;
    }
}

/// A `side × side` matrix of cells stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fresh grid: every cell empty, no owners, row/col set to indices.
    pub fn new(side: usize) -> Self {
        let cells = (0..side * side)
            .map(|idx| Cell::empty(idx / side, idx % side))
            .collect();
        Grid { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side
    }

    /// Cell at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            Some(&self.cells[row * self.side + col])
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.in_bounds(row, col) {
            let side = self.side;
            Some(&mut self.cells[row * side + col])
        } else {
            None
        }
    }

    /// State at (row, col), or `None` when out of bounds.
    pub fn state(&self, row: usize, col: usize) -> Option<CellState> {
        self.get(row, col).map(Cell::state)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    /// Cells in one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.side..(row + 1) * self.side]
    }

    /// Number of cells currently owned by any ship.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.ship_id.is_some()).count()
    }

    /// Opponent-facing rendering that hides intact ship segments.
    pub fn fog_view(&self) -> FogView<'_> {
        FogView { grid: self }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, hide_ships: bool) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.side {
            write!(f, "{:>2}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.side {
            write!(f, "{:>2} ", r)?;
            for cell in self.row(r) {
                let state = match cell.state {
                    CellState::Ship | CellState::Preview if hide_ships => CellState::Empty,
                    s => s,
                };
                write!(f, " {}", state.glyph())?;
            }
            if r + 1 < self.side {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.side, self.side)?;
        self.render(f, false)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

/// Display adapter showing only fired cells.
pub struct FogView<'a> {
    grid: &'a Grid,
}

impl fmt::Display for FogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.grid.render(f, true)
    }
}

/// `initializeGrid`: a `side × side` grid of empty cells.
pub fn initialize_grid(side: usize) -> Grid {
    Grid::new(side)
}
