use naval_engine::{
    CellState, Game, GameError, GamePhase, Orientation, PlacementFault, ShotKind, Side, BOARD_SIZE,
    NUM_SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn started_game(seed: u64) -> Game {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::default();
    for (row, name) in [
        (0, "Carrier"),
        (2, "Battleship"),
        (4, "Cruiser"),
        (6, "Submarine"),
        (8, "Destroyer"),
    ] {
        game.place_ship(name, row, 0, Orientation::Horizontal).unwrap();
    }
    game.start(&mut rng).unwrap();
    game
}

#[test]
fn test_setup_phase_rules() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut game = Game::default();
    assert_eq!(game.phase(), GamePhase::Setup);
    assert_eq!(game.board_size(), BOARD_SIZE);
    assert_eq!(game.fire(Side::Human, 0, 0), Err(GameError::WrongPhase));

    game.place_ship("Carrier", 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(game.start(&mut rng), Err(GameError::FleetIncomplete));
    assert_eq!(game.fleet(Side::Human).len(), 1);
    assert_eq!(game.grid(Side::Human).occupied_count(), 5);

    let preview = game.preview(3, 3, Orientation::Vertical);
    let marked = preview
        .cells()
        .filter(|c| c.state() == CellState::Preview)
        .count();
    assert_eq!(marked, 4, "preview shows the Battleship next");

    game.reset_setup().unwrap();
    assert!(game.fleet(Side::Human).is_empty());
}

#[test]
fn test_place_ship_with_huge_origin_is_rejected() {
    let mut game = Game::default();
    assert_eq!(
        game.place_ship("Carrier", usize::MAX, 0, Orientation::Vertical),
        Err(GameError::InvalidPlacement(PlacementFault::OutOfBounds))
    );
    assert_eq!(
        game.place_ship("Destroyer", 4, usize::MAX, Orientation::Horizontal),
        Err(GameError::InvalidPlacement(PlacementFault::OutOfBounds))
    );
    assert!(game.fleet(Side::Human).is_empty());
    assert_eq!(game.grid(Side::Human).occupied_count(), 0);
}

#[test]
fn test_start_places_computer_fleet() {
    let game = started_game(5);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.fleet(Side::Computer).len(), NUM_SHIPS);
    assert_eq!(game.grid(Side::Computer).occupied_count(), TOTAL_SHIP_CELLS);
    assert_eq!(game.grid(Side::Human).state(0, 0), Some(CellState::Ship));

    let mut game = game;
    assert_eq!(
        game.place_ship("Carrier", 5, 5, Orientation::Vertical),
        Err(GameError::WrongPhase)
    );
}

#[test]
fn test_turns_alternate_and_refire_is_rejected() {
    let mut game = started_game(9);
    assert_eq!(game.fire(Side::Computer, 0, 0), Err(GameError::NotYourTurn));

    game.fire(Side::Human, 5, 5).unwrap();
    assert_eq!(game.turn(), Side::Computer);
    let outcome = game.fire(Side::Computer, 8, 0).unwrap();
    assert_eq!(outcome.kind, ShotKind::Hit);
    assert_eq!(outcome.ship_name(), Some("Destroyer"));
    assert_eq!(game.turn(), Side::Human);

    assert_eq!(
        game.fire(Side::Human, 5, 5),
        Err(GameError::AlreadyFiredTarget { row: 5, col: 5 })
    );
    assert_eq!(
        game.fire(Side::Human, BOARD_SIZE, 0),
        Err(GameError::OutOfBoundsTarget { row: BOARD_SIZE, col: 0 })
    );
    // rejected shots cost nothing
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.shots_fired(Side::Human), 1);
    assert_eq!(game.history_against(Side::Computer).fired_count(), 1);
    assert_eq!(game.history_against(Side::Human).hits, vec![(8, 0)]);
}

#[test]
fn test_local_self_play_finishes() {
    let mut game = started_game(21);
    let mut rng = SmallRng::seed_from_u64(99);
    while game.phase() == GamePhase::Playing {
        let shooter = game.turn();
        let (choice, outcome) = game.play_turn_local(shooter, &mut rng).unwrap();
        assert_eq!(outcome.coord, choice.coord());
    }
    let winner = game.winner().unwrap();
    let loser = winner.opponent();
    assert!(game.fleet(loser).is_destroyed());
    assert!(!game.fleet(winner).is_destroyed());
    assert!(game.shots_fired(winner) >= TOTAL_SHIP_CELLS);
    assert!(game.shots_fired(winner) <= BOARD_SIZE * BOARD_SIZE);
    assert_eq!(game.last_outcome().map(|o| o.kind), Some(ShotKind::Sunk));
    assert_eq!(game.fire(winner, 0, 0), Err(GameError::WrongPhase));
}

#[test]
fn test_reset_returns_to_setup_with_fresh_ids() {
    let mut game = started_game(3);
    let before = game.fleet(Side::Computer).ships()[0].id();
    game.reset();
    assert_eq!(game.phase(), GamePhase::Setup);
    assert_eq!(game.winner(), None);
    assert_eq!(game.shots_fired(Side::Human), 0);
    let id = game.place_ship("Destroyer", 0, 0, Orientation::Vertical).unwrap();
    assert!(id > before);
}

#[test]
fn test_random_setup() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut game = Game::new(8);
    game.place_ship("Destroyer", 7, 6, Orientation::Horizontal).unwrap();
    game.place_remaining_randomly(&mut rng).unwrap();
    assert!(game.setup().is_complete());
    game.start(&mut rng).unwrap();
    assert_eq!(game.grid(Side::Human).occupied_count(), TOTAL_SHIP_CELLS);
    assert_eq!(game.grid(Side::Computer).side(), 8);
}
