//! Commonly used types and utilities for ease of import.

pub use crate::{
    is_fleet_destroyed, process_shot, select_target, Game, GameError, GamePhase, Grid,
    Orientation, ShotHistory, ShotKind, ShotOutcome, Side,
};

#[cfg(feature = "std")]
pub use crate::{HuntTargetStrategy, RemoteStrategy, TargetingStrategy};
