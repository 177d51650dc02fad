#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod common;
mod config;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
pub mod prelude;
pub mod protocol;
#[cfg(feature = "std")]
pub mod remote;
mod ship;
mod shot;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
mod strategy;
#[cfg(feature = "std")]
pub mod transport;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::*;
pub use protocol::{Message, TargetRequest, TargetResponse, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use remote::{RemoteStrategy, ReasoningService, StrategyServiceFailure, TransportService};
pub use ship::*;
pub use shot::*;
#[cfg(feature = "std")]
pub use skeleton::TargetingSkeleton;
#[cfg(feature = "std")]
pub use strategy::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
