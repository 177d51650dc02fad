use naval_engine::{initialize_grid, CellState, Grid, BOARD_SIZE};

#[test]
fn test_initialize_grid_is_empty_and_indexed() {
    let grid = initialize_grid(BOARD_SIZE);
    assert_eq!(grid.side(), BOARD_SIZE);
    assert_eq!(grid.cells().count(), BOARD_SIZE * BOARD_SIZE);
    for cell in grid.cells() {
        assert_eq!(cell.state(), CellState::Empty);
        assert_eq!(cell.ship_id(), None);
    }
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let cell = grid.get(r, c).unwrap();
            assert_eq!(cell.coord(), (r, c));
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_bounds() {
    let grid = Grid::new(4);
    assert!(grid.in_bounds(3, 3));
    assert!(!grid.in_bounds(4, 0));
    assert!(!grid.in_bounds(0, 4));
    assert!(grid.get(4, 0).is_none());
    assert_eq!(grid.state(9, 9), None);
    assert_eq!(grid.row(2).len(), 4);
    assert!(grid.row(2).iter().all(|c| c.row() == 2));
}

#[test]
fn test_zero_sized_grid() {
    let grid = initialize_grid(0);
    assert_eq!(grid.cells().count(), 0);
    assert!(!grid.in_bounds(0, 0));
}

#[test]
fn test_cell_state_fired() {
    assert!(CellState::Hit.is_fired());
    assert!(CellState::Miss.is_fired());
    assert!(CellState::Sunk.is_fired());
    assert!(!CellState::Empty.is_fired());
    assert!(!CellState::Ship.is_fired());
    assert!(!CellState::Preview.is_fired());
}

#[test]
fn test_rendering_has_one_line_per_row() {
    let grid = Grid::new(3);
    let text = grid.to_string();
    // header plus three rows
    assert_eq!(text.lines().count(), 4);
    assert_eq!(grid.fog_view().to_string(), text);
}
