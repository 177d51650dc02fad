//! One side's fleet and the win predicate.

use alloc::vec::Vec;

use crate::ship::{Ship, ShipId};

/// Ships owned by one side, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id() == id)
    }

    /// The ship of the given catalog name, if placed.
    pub fn by_name(&self, name: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.name() == name)
    }

    pub(crate) fn push(&mut self, ship: Ship) {
        self.ships.push(ship);
    }

    /// Total cells covered by all ships.
    pub fn occupied_cells(&self) -> usize {
        self.ships.iter().map(Ship::size).sum()
    }

    /// Ships not yet sunk.
    pub fn afloat(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.iter().filter(|s| !s.is_sunk())
    }

    /// `isFleetDestroyed`.
    pub fn is_destroyed(&self) -> bool {
        is_fleet_destroyed(self)
    }
}

/// True iff every ship in the fleet is sunk.
pub fn is_fleet_destroyed(fleet: &Fleet) -> bool {
    fleet.ships.iter().all(Ship::is_sunk)
}
