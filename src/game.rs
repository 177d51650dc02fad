//! Game session: setup, turn order and win detection for both sides.

use log::info;
use rand::Rng;

use crate::{
    ai::{self, TargetChoice},
    common::GameError,
    config::BOARD_SIZE,
    fleet::Fleet,
    grid::Grid,
    placement::{place_all_computer_ships, FleetBuilder},
    ship::{Orientation, ShipId, ShipIdAllocator},
    shot::{check_shot, process_shot, ShotHistory, ShotOutcome},
};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

/// A side's grid and the fleet placed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideState {
    pub grid: Grid,
    pub fleet: Fleet,
}

impl SideState {
    fn empty(side: usize) -> Self {
        Self {
            grid: Grid::new(side),
            fleet: Fleet::new(),
        }
    }
}

/// Turn coordinator holding both sides' state.
///
/// Every shot goes through [`Game::fire`], which rejects out-of-turn,
/// out-of-bounds and repeated targets before resolving anything.
#[derive(Debug, Clone)]
pub struct Game {
    board_size: usize,
    ids: ShipIdAllocator,
    setup: FleetBuilder,
    human: SideState,
    computer: SideState,
    phase: GamePhase,
    turn: Side,
    winner: Option<Side>,
    last_outcome: Option<ShotOutcome>,
    shots: [usize; 2],
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Game {
    /// A session in the setup phase on a `board_size` square board.
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ids: ShipIdAllocator::new(),
            setup: FleetBuilder::new(board_size),
            human: SideState::empty(board_size),
            computer: SideState::empty(board_size),
            phase: GamePhase::Setup,
            turn: Side::Human,
            winner: None,
            last_outcome: None,
            shots: [0; 2],
        }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Side due to fire next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn last_outcome(&self) -> Option<ShotOutcome> {
        self.last_outcome
    }

    /// Shots fired so far by `side`.
    pub fn shots_fired(&self, side: Side) -> usize {
        self.shots[side as usize]
    }

    /// Interactive placement state for the human side.
    pub fn setup(&self) -> &FleetBuilder {
        &self.setup
    }

    fn state(&self, side: Side) -> &SideState {
        match side {
            Side::Human => &self.human,
            Side::Computer => &self.computer,
        }
    }

    fn state_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Human => &mut self.human,
            Side::Computer => &mut self.computer,
        }
    }

    /// The side's own grid. During setup the human grid is the one being built.
    pub fn grid(&self, side: Side) -> &Grid {
        match (self.phase, side) {
            (GamePhase::Setup, Side::Human) => self.setup.grid(),
            _ => &self.state(side).grid,
        }
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        match (self.phase, side) {
            (GamePhase::Setup, Side::Human) => self.setup.fleet(),
            _ => &self.state(side).fleet,
        }
    }

    /// Fog-of-war history of the shots fired at `defender`.
    pub fn history_against(&self, defender: Side) -> ShotHistory {
        ShotHistory::from_grid(self.grid(defender))
    }

    fn ensure_phase(&self, phase: GamePhase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase)
        }
    }

    /// Place one named human ship during setup.
    pub fn place_ship(
        &mut self,
        name: &str,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        self.ensure_phase(GamePhase::Setup)?;
        self.setup.place(name, row, col, orientation, &mut self.ids)
    }

    /// Place whatever human ships remain at random.
    pub fn place_remaining_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::Setup)?;
        self.setup.fill_randomly(&mut self.ids, rng)
    }

    /// Preview of the next unplaced human ship at the given origin.
    pub fn preview(&self, row: usize, col: usize, orientation: Orientation) -> Grid {
        self.setup.preview(row, col, orientation)
    }

    /// Discard all human placements.
    pub fn reset_setup(&mut self) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::Setup)?;
        self.setup.reset();
        Ok(())
    }

    /// Leave setup: requires a complete human fleet and lays out the
    /// computer fleet at random. The human fires first.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_phase(GamePhase::Setup)?;
        if !self.setup.is_complete() {
            return Err(GameError::FleetIncomplete);
        }
        let (grid, fleet) = place_all_computer_ships(self.board_size, &mut self.ids, rng)?;
        self.computer = SideState { grid, fleet };
        let (grid, fleet) = self.setup.clone().into_parts();
        self.human = SideState { grid, fleet };
        self.phase = GamePhase::Playing;
        self.turn = Side::Human;
        info!("game started on a {}x{} board", self.board_size, self.board_size);
        Ok(())
    }

    /// Resolve a shot by `shooter` at (row, col) on the opponent's grid.
    pub fn fire(&mut self, shooter: Side, row: usize, col: usize) -> Result<ShotOutcome, GameError> {
        self.ensure_phase(GamePhase::Playing)?;
        if shooter != self.turn {
            return Err(GameError::NotYourTurn);
        }
        let defender = shooter.opponent();
        let target = self.state(defender);
        check_shot(&target.grid, &target.fleet, row, col)?;

        let resolution = process_shot(&target.grid, &target.fleet, row, col);
        let destroyed = resolution.fleet.is_destroyed();
        *self.state_mut(defender) = SideState {
            grid: resolution.grid,
            fleet: resolution.fleet,
        };
        self.shots[shooter as usize] += 1;
        self.last_outcome = Some(resolution.outcome);

        if destroyed {
            self.phase = GamePhase::GameOver;
            self.winner = Some(shooter);
            info!("{:?} wins after {} shots", shooter, self.shots[shooter as usize]);
        } else {
            self.turn = defender;
        }
        Ok(resolution.outcome)
    }

    /// Fire for `shooter` at a coordinate chosen by the local hunt/target
    /// strategy from the shooter's fog-of-war view.
    pub fn play_turn_local<R: Rng + ?Sized>(
        &mut self,
        shooter: Side,
        rng: &mut R,
    ) -> Result<(TargetChoice, ShotOutcome), GameError> {
        let history = self.history_against(shooter.opponent());
        let choice = ai::select_target(&history, rng)?;
        let outcome = self.fire(shooter, choice.row, choice.col)?;
        Ok((choice, outcome))
    }

    /// Fire for `shooter` at a coordinate chosen by `strategy`. The choice
    /// is validated again by [`Game::fire`] before it is applied.
    #[cfg(feature = "std")]
    pub async fn play_turn(
        &mut self,
        shooter: Side,
        strategy: &mut dyn crate::strategy::TargetingStrategy,
    ) -> Result<(TargetChoice, ShotOutcome), GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::WrongPhase);
        }
        let history = self.history_against(shooter.opponent());
        let choice = strategy.choose_target(&history).await?;
        let outcome = self.fire(shooter, choice.row, choice.col)?;
        Ok((choice, outcome))
    }

    /// Back to an empty setup phase. Ship ids keep counting up.
    pub fn reset(&mut self) {
        let ids = core::mem::take(&mut self.ids);
        *self = Game::new(self.board_size);
        self.ids = ids;
    }
}
