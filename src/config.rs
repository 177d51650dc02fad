//! Fixed game configuration: board size and the standard fleet catalog.

use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
/// Largest board side accepted from callers or from the wire.
pub const MAX_BOARD_SIZE: usize = 256;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Look up a catalog entry by name. Returns `None` if the name does not
/// match any defined ship.
pub fn ship_type_by_name(name: &str) -> Option<ShipType> {
    SHIPS.iter().copied().find(|def| def.name() == name)
}

/// Remote targeting service settings.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Upper bound on one request/response round trip.
    pub timeout: std::time::Duration,
    /// Largest frame accepted from or sent to the service.
    pub max_message_size: u32,
}

#[cfg(feature = "std")]
impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout: std::time::Duration::from_secs(5),
            max_message_size: 64 * 1024,
        }
    }
}

/// Default idle gap a served session tolerates between two requests.
#[cfg(feature = "std")]
pub const SERVE_IDLE_TIMEOUT_SECS: u64 = 300;

#[cfg(feature = "std")]
impl RemoteConfig {
    /// Settings for the serving side, where the wait between requests spans
    /// the client's whole turn rather than one round trip.
    pub fn serving(idle_timeout: std::time::Duration) -> Self {
        Self {
            timeout: idle_timeout,
            ..Self::default()
        }
    }
}
