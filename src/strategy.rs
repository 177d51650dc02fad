//! Pluggable targeting strategies for the computer side.

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    ai::{self, TargetChoice},
    common::GameError,
    game::{Game, GamePhase, Side},
    shot::ShotHistory,
};

/// Something that picks the next coordinate to fire at.
///
/// A returned choice must lie inside the board and be absent from the
/// history; callers still re-check it before applying it.
#[async_trait::async_trait]
pub trait TargetingStrategy: Send {
    async fn choose_target(&mut self, history: &ShotHistory) -> Result<TargetChoice, GameError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Local deterministic hunt/target strategy.
pub struct HuntTargetStrategy {
    rng: SmallRng,
}

impl HuntTargetStrategy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

#[async_trait::async_trait]
impl TargetingStrategy for HuntTargetStrategy {
    async fn choose_target(&mut self, history: &ShotHistory) -> Result<TargetChoice, GameError> {
        ai::select_target(history, &mut self.rng)
    }

    fn name(&self) -> &'static str {
        "hunt-target"
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub winner: Side,
    pub human_shots: usize,
    pub computer_shots: usize,
}

/// Alternate turns until one fleet is destroyed. The game must already be
/// in the playing phase.
pub async fn play_out(
    game: &mut Game,
    human: &mut dyn TargetingStrategy,
    computer: &mut dyn TargetingStrategy,
) -> Result<MatchReport, GameError> {
    while game.phase() == GamePhase::Playing {
        let shooter = game.turn();
        let strategy: &mut dyn TargetingStrategy = match shooter {
            Side::Human => &mut *human,
            Side::Computer => &mut *computer,
        };
        let (choice, outcome) = game.play_turn(shooter, strategy).await?;
        info!(
            "{:?} fired at ({}, {}): {:?}{} [{}]",
            shooter,
            choice.row,
            choice.col,
            outcome.kind,
            outcome.ship_name().map(|n| format!(" on {}", n)).unwrap_or_default(),
            choice.rationale
        );
    }
    let winner = game.winner().ok_or(GameError::WrongPhase)?;
    Ok(MatchReport {
        winner,
        human_shots: game.shots_fired(Side::Human),
        computer_shots: game.shots_fired(Side::Computer),
    })
}
