// Hunt/target shot selection over the fog-of-war history.
// Stateless: the mode is recomputed from the history on every call.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::common::{Coord, GameError};
use crate::config::MAX_BOARD_SIZE;
use crate::shot::ShotHistory;

/// Which sub-strategy produced a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// No hit with an unfired neighbour; sweeping the board.
    Hunting,
    /// Extending or probing around an existing hit.
    Targeting,
    /// Chosen by an external reasoning service.
    Remote,
    /// Uniform pick used when a remote strategy is unusable.
    Fallback,
}

/// A chosen coordinate and a short explanation of how it was picked. The
/// rationale only ever names the chosen coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChoice {
    pub row: usize,
    pub col: usize,
    pub mode: TargetMode,
    pub rationale: String,
}

impl TargetChoice {
    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unfired,
    Hit,
    Miss,
}

/// Dense per-cell view of a history. Entries outside the board are ignored.
struct FiredMap {
    side: usize,
    marks: Vec<Mark>,
}

impl FiredMap {
    /// Fails on a side above [`MAX_BOARD_SIZE`]; the history may come off
    /// the wire.
    fn new(history: &ShotHistory) -> Result<Self, GameError> {
        let side = history.board_size;
        if side > MAX_BOARD_SIZE {
            return Err(GameError::BoardTooLarge { side });
        }
        let mut marks = alloc::vec![Mark::Unfired; side * side];
        for &(r, c) in &history.misses {
            if r < side && c < side {
                marks[r * side + c] = Mark::Miss;
            }
        }
        for &(r, c) in &history.hits {
            if r < side && c < side {
                marks[r * side + c] = Mark::Hit;
            }
        }
        Ok(FiredMap { side, marks })
    }

    fn mark(&self, row: usize, col: usize) -> Option<Mark> {
        if row < self.side && col < self.side {
            Some(self.marks[row * self.side + col])
        } else {
            None
        }
    }

    fn is_unfired(&self, row: usize, col: usize) -> bool {
        self.mark(row, col) == Some(Mark::Unfired)
    }

    fn is_hit(&self, row: usize, col: usize) -> bool {
        self.mark(row, col) == Some(Mark::Hit)
    }

    fn unfired(&self) -> impl Iterator<Item = Coord> + '_ {
        let side = self.side;
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Mark::Unfired)
            .map(move |(idx, _)| (idx / side, idx % side))
    }
}

/// Orthogonal neighbours in probing order: up, down, left, right.
fn neighbours(row: usize, col: usize) -> [(Option<Coord>, &'static str); 4] {
    [
        (row.checked_sub(1).map(|r| (r, col)), "above"),
        (Some((row + 1, col)), "below"),
        (col.checked_sub(1).map(|c| (row, c)), "left of"),
        (Some((row, col + 1)), "right of"),
    ]
}

fn step(coord: Coord, axis: Coord, forward: bool) -> Option<Coord> {
    if forward {
        Some((coord.0 + axis.0, coord.1 + axis.1))
    } else {
        Some((coord.0.checked_sub(axis.0)?, coord.1.checked_sub(axis.1)?))
    }
}

/// True when some hit has an in-bounds, unfired orthogonal neighbour.
pub fn targeting_mode_active(history: &ShotHistory) -> bool {
    let Ok(map) = FiredMap::new(history) else {
        return false;
    };
    history.hits.iter().any(|&(r, c)| {
        map.is_hit(r, c)
            && neighbours(r, c)
                .iter()
                .filter_map(|(n, _)| *n)
                .any(|(nr, nc)| map.is_unfired(nr, nc))
    })
}

/// Project a run of two or more colinear hits past either end.
fn extend_line(history: &ShotHistory, map: &FiredMap) -> Option<TargetChoice> {
    const AXES: [(Coord, &str); 2] = [((0, 1), "horizontal"), ((1, 0), "vertical")];
    for &(r, c) in &history.hits {
        if !map.is_hit(r, c) {
            continue;
        }
        for (axis, label) in AXES {
            let Some(next) = step((r, c), axis, true) else { continue };
            if !map.is_hit(next.0, next.1) {
                continue;
            }
            let mut start = (r, c);
            while let Some(prev) = step(start, axis, false).filter(|p| map.is_hit(p.0, p.1)) {
                start = prev;
            }
            let mut end = next;
            let mut run = 2;
            while let Some(after) = step(end, axis, true).filter(|p| map.is_hit(p.0, p.1)) {
                end = after;
                run += 1;
            }
            let forward = step(end, axis, true);
            let backward = step(start, axis, false);
            for cand in [forward, backward].into_iter().flatten() {
                if map.is_unfired(cand.0, cand.1) {
                    return Some(TargetChoice {
                        row: cand.0,
                        col: cand.1,
                        mode: TargetMode::Targeting,
                        rationale: format!(
                            "Targeting mode: extending a {} line of {} hits to ({}, {}).",
                            label, run, cand.0, cand.1
                        ),
                    });
                }
            }
        }
    }
    None
}

/// Try the four neighbours of each hit in a fixed order.
fn try_neighbours(history: &ShotHistory, map: &FiredMap) -> Option<TargetChoice> {
    for &(r, c) in &history.hits {
        if !map.is_hit(r, c) {
            continue;
        }
        for (n, dir) in neighbours(r, c) {
            let Some((nr, nc)) = n else { continue };
            if map.is_unfired(nr, nc) {
                return Some(TargetChoice {
                    row: nr,
                    col: nc,
                    mode: TargetMode::Targeting,
                    rationale: format!(
                        "Targeting mode: firing at ({}, {}), the cell {} an earlier hit.",
                        nr, nc, dir
                    ),
                });
            }
        }
    }
    None
}

fn pick<R: Rng + ?Sized>(cells: &[Coord], rng: &mut R) -> Option<Coord> {
    if cells.is_empty() {
        None
    } else {
        Some(cells[rng.random_range(0..cells.len())])
    }
}

/// Checkerboard sweep: the smallest ship spans two cells, so one colour of
/// the board is enough to find every ship.
fn hunt<R: Rng + ?Sized>(
    history: &ShotHistory,
    map: &FiredMap,
    rng: &mut R,
) -> Result<TargetChoice, GameError> {
    let unfired: Vec<Coord> = map.unfired().collect();
    let parity: Vec<Coord> = unfired.iter().copied().filter(|(r, c)| (r + c) % 2 == 0).collect();
    let (cell, how) = match pick(&parity, rng) {
        Some(cell) => (cell, "checkerboard pick"),
        None => (pick(&unfired, rng).ok_or(GameError::NoValidTarget)?, "random pick"),
    };
    let reason = if history.hits.is_empty() {
        "no hits yet"
    } else {
        "no hit has an unfired neighbour"
    };
    Ok(TargetChoice {
        row: cell.0,
        col: cell.1,
        mode: TargetMode::Hunting,
        rationale: format!("Hunting mode: {}, {} at ({}, {}).", reason, how, cell.0, cell.1),
    })
}

/// Choose the next shot from the hit/miss history.
///
/// The result is always inside the board and absent from both lists.
/// Returns [`GameError::NoValidTarget`] when every cell has been fired upon
/// and [`GameError::BoardTooLarge`] for a side above [`MAX_BOARD_SIZE`].
pub fn select_target<R: Rng + ?Sized>(
    history: &ShotHistory,
    rng: &mut R,
) -> Result<TargetChoice, GameError> {
    let map = FiredMap::new(history)?;
    let choice = match extend_line(history, &map).or_else(|| try_neighbours(history, &map)) {
        Some(choice) => choice,
        None => hunt(history, &map, rng)?,
    };
    debug!("{}", choice.rationale);
    Ok(choice)
}

/// Uniform pick among unfired cells; the contract-safe fallback.
pub fn random_target<R: Rng + ?Sized>(
    history: &ShotHistory,
    rng: &mut R,
) -> Result<TargetChoice, GameError> {
    let map = FiredMap::new(history)?;
    let unfired: Vec<Coord> = map.unfired().collect();
    let (row, col) = pick(&unfired, rng).ok_or(GameError::NoValidTarget)?;
    Ok(TargetChoice {
        row,
        col,
        mode: TargetMode::Fallback,
        rationale: format!("Fallback: uniform random pick of unfired cell ({}, {}).", row, col),
    })
}

/// Check a proposed target against the hard contract: in bounds and not
/// yet fired upon.
pub fn check_target(history: &ShotHistory, row: usize, col: usize) -> Result<(), GameError> {
    if row >= history.board_size || col >= history.board_size {
        return Err(GameError::OutOfBoundsTarget { row, col });
    }
    if history.contains((row, col)) {
        return Err(GameError::AlreadyFiredTarget { row, col });
    }
    Ok(())
}
