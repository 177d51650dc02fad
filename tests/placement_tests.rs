use naval_engine::{
    can_place, check_placement, compute_occupied_coordinates, place_all_computer_ships,
    place_fleet_randomly, place_ship_on_grid, preview_placement, random_placement, CellState,
    FleetBuilder, GameError, Grid, Orientation, PlacementFault, Ship, ShipIdAllocator, ShipType,
    BOARD_SIZE, MAX_BOARD_SIZE, NUM_SHIPS, SHIPS, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_compute_occupied_coordinates() {
    assert_eq!(
        compute_occupied_coordinates(2, 3, 3, Orientation::Horizontal),
        vec![(2, 3), (2, 4), (2, 5)]
    );
    assert_eq!(
        compute_occupied_coordinates(2, 3, 3, Orientation::Vertical),
        vec![(2, 3), (3, 3), (4, 3)]
    );
    // no bounds check, no wraparound
    assert_eq!(
        compute_occupied_coordinates(0, 9, 2, Orientation::Horizontal),
        vec![(0, 9), (0, 10)]
    );
}

#[test]
fn test_can_place_edges() {
    let grid = Grid::new(BOARD_SIZE);
    assert!(can_place(&grid, 0, 5, 5, Orientation::Horizontal));
    assert!(!can_place(&grid, 0, 6, 5, Orientation::Horizontal));
    assert!(can_place(&grid, 5, 9, 5, Orientation::Vertical));
    assert!(!can_place(&grid, 6, 9, 5, Orientation::Vertical));
    assert_eq!(
        check_placement(&grid, 9, 9, 2, Orientation::Vertical),
        Err(PlacementFault::OutOfBounds)
    );
}

#[test]
fn test_huge_origin_is_out_of_bounds() {
    let grid = Grid::new(BOARD_SIZE);
    assert!(!can_place(&grid, 0, usize::MAX, 2, Orientation::Horizontal));
    assert!(!can_place(&grid, usize::MAX, 0, 5, Orientation::Vertical));
    assert!(!can_place(&grid, usize::MAX - 1, 3, 2, Orientation::Horizontal));
    assert_eq!(
        check_placement(&grid, 3, usize::MAX - 2, 5, Orientation::Horizontal),
        Err(PlacementFault::OutOfBounds)
    );

    let mut ids = ShipIdAllocator::new();
    let mut builder = FleetBuilder::new(BOARD_SIZE);
    assert_eq!(
        builder.place("Carrier", usize::MAX, 0, Orientation::Vertical, &mut ids),
        Err(GameError::InvalidPlacement(PlacementFault::OutOfBounds))
    );
    assert!(builder.fleet().is_empty());
    let preview = preview_placement(&grid, 0, usize::MAX, 3, Orientation::Horizontal);
    assert!(preview.cells().all(|c| c.state() == CellState::Empty));
}

#[test]
fn test_oversized_board_is_rejected() {
    let mut ids = ShipIdAllocator::new();
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        place_fleet_randomly(MAX_BOARD_SIZE + 1, &SHIPS, &mut ids, &mut rng).unwrap_err(),
        GameError::BoardTooLarge { side: MAX_BOARD_SIZE + 1 }
    );
}

#[test]
fn test_place_ship_on_grid_is_pure() {
    let mut ids = ShipIdAllocator::new();
    let grid = Grid::new(BOARD_SIZE);
    let ship = Ship::new(ids.allocate(), SHIPS[4], Orientation::Vertical, 3, 3);
    let placed = place_ship_on_grid(&grid, &ship);

    assert_eq!(grid.occupied_count(), 0);
    assert_eq!(placed.occupied_count(), 2);
    for (r, c) in [(3, 3), (4, 3)] {
        let cell = placed.get(r, c).unwrap();
        assert_eq!(cell.state(), CellState::Ship);
        assert_eq!(cell.ship_id(), Some(ship.id()));
    }
    assert_eq!(
        check_placement(&placed, 4, 2, 3, Orientation::Horizontal),
        Err(PlacementFault::Overlaps)
    );
    // touching edge to edge is allowed
    assert!(can_place(&placed, 3, 4, 3, Orientation::Vertical));
}

#[test]
fn test_preview_marks_and_clears() {
    let grid = Grid::new(BOARD_SIZE);
    let preview = preview_placement(&grid, 1, 1, 3, Orientation::Horizontal);
    let marked: Vec<_> = preview
        .cells()
        .filter(|c| c.state() == CellState::Preview)
        .map(|c| c.coord())
        .collect();
    assert_eq!(marked, vec![(1, 1), (1, 2), (1, 3)]);
    assert!(preview.cells().all(|c| c.ship_id().is_none()));

    // moving the preview drops the old marks
    let moved = preview_placement(&preview, 5, 5, 2, Orientation::Vertical);
    let marked: Vec<_> = moved
        .cells()
        .filter(|c| c.state() == CellState::Preview)
        .map(|c| c.coord())
        .collect();
    assert_eq!(marked, vec![(5, 5), (6, 5)]);

    // a ship that does not fit leaves no marks at all
    let off = preview_placement(&moved, 9, 9, 3, Orientation::Horizontal);
    assert!(off.cells().all(|c| c.state() == CellState::Empty));
}

#[test]
fn test_random_placement_is_valid() {
    let grid = Grid::new(BOARD_SIZE);
    let mut rng = SmallRng::seed_from_u64(42);
    let (r, c, orient) = random_placement(&grid, &mut rng, SHIPS[0]).unwrap();
    assert!(can_place(&grid, r, c, SHIPS[0].length(), orient));
}

#[test]
fn test_random_placement_gives_up_when_full() {
    let grid = Grid::new(1);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(random_placement(&grid, &mut rng, ShipType::new("Long", 2)), None);
}

#[test]
fn test_place_all_computer_ships() {
    let mut ids = ShipIdAllocator::new();
    let mut rng = SmallRng::seed_from_u64(7);
    let (grid, fleet) = place_all_computer_ships(BOARD_SIZE, &mut ids, &mut rng).unwrap();

    assert_eq!(fleet.len(), NUM_SHIPS);
    assert_eq!(grid.occupied_count(), TOTAL_SHIP_CELLS);
    assert_eq!(fleet.occupied_cells(), TOTAL_SHIP_CELLS);
    for (ship, def) in fleet.ships().iter().zip(SHIPS.iter()) {
        assert_eq!(ship.name(), def.name());
        assert_eq!(ship.positions().len(), def.length());
        for &(r, c) in ship.positions() {
            assert_eq!(grid.get(r, c).unwrap().ship_id(), Some(ship.id()));
        }
    }
}

#[test]
fn test_capacity_rejected() {
    let mut ids = ShipIdAllocator::new();
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        place_fleet_randomly(4, &SHIPS, &mut ids, &mut rng).unwrap_err(),
        GameError::InsufficientCapacity {
            needed: TOTAL_SHIP_CELLS,
            available: 16
        }
    );
}

#[test]
fn test_tight_board_still_completes() {
    // 5x5 holding a 5,4,3,3,2 fleet: 17 of 25 cells, forces restarts
    let mut ids = ShipIdAllocator::new();
    let mut rng = SmallRng::seed_from_u64(3);
    let (grid, fleet) = place_fleet_randomly(5, &SHIPS, &mut ids, &mut rng).unwrap();
    assert_eq!(grid.occupied_count(), TOTAL_SHIP_CELLS);
    assert_eq!(fleet.len(), NUM_SHIPS);
}

#[test]
fn test_fleet_builder_errors_leave_state_untouched() {
    let mut ids = ShipIdAllocator::new();
    let mut builder = FleetBuilder::new(BOARD_SIZE);

    assert_eq!(
        builder.place("Rowboat", 0, 0, Orientation::Horizontal, &mut ids),
        Err(GameError::UnknownShip("Rowboat".to_string()))
    );
    assert_eq!(
        builder.place("Carrier", 0, 6, Orientation::Horizontal, &mut ids),
        Err(GameError::InvalidPlacement(PlacementFault::OutOfBounds))
    );
    assert_eq!(builder.grid().occupied_count(), 0);

    builder.place("Carrier", 0, 0, Orientation::Horizontal, &mut ids).unwrap();
    assert_eq!(
        builder.place("Carrier", 5, 0, Orientation::Horizontal, &mut ids),
        Err(GameError::ShipAlreadyPlaced("Carrier"))
    );
    assert_eq!(
        builder.place("Cruiser", 0, 2, Orientation::Vertical, &mut ids),
        Err(GameError::InvalidPlacement(PlacementFault::Overlaps))
    );
    assert_eq!(builder.fleet().len(), 1);
    assert_eq!(builder.next_unplaced().map(|s| s.name()), Some("Battleship"));
}

#[test]
fn test_fleet_builder_place_next_and_fill() {
    let mut ids = ShipIdAllocator::new();
    let mut builder = FleetBuilder::new(BOARD_SIZE);
    builder
        .place_next(9, 0, Orientation::Horizontal, &mut ids)
        .unwrap()
        .unwrap();
    assert_eq!(builder.fleet().by_name("Carrier").unwrap().origin(), (9, 0));

    let mut rng = SmallRng::seed_from_u64(11);
    builder.fill_randomly(&mut ids, &mut rng).unwrap();
    assert!(builder.is_complete());
    assert!(builder.place_next(0, 0, Orientation::Vertical, &mut ids).is_none());
    assert_eq!(builder.grid().occupied_count(), TOTAL_SHIP_CELLS);

    builder.reset();
    assert!(builder.fleet().is_empty());
    assert_eq!(builder.grid().occupied_count(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_layout_never_overlaps(seed in any::<u64>(), side in 5usize..=12) {
        let mut ids = ShipIdAllocator::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let (grid, fleet) = place_fleet_randomly(side, &SHIPS, &mut ids, &mut rng).unwrap();
        prop_assert_eq!(grid.occupied_count(), TOTAL_SHIP_CELLS);
        let summed: usize = fleet.ships().iter().map(|s| s.positions().len()).sum();
        prop_assert_eq!(summed, TOTAL_SHIP_CELLS);
        for ship in fleet.ships() {
            for &(r, c) in ship.positions() {
                prop_assert!(r < side && c < side);
                prop_assert_eq!(grid.get(r, c).unwrap().ship_id(), Some(ship.id()));
            }
        }
    }
}
