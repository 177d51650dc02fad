//! Request/response shapes for a targeting service and the frames that
//! carry them over a transport.

use alloc::string::String;
use alloc::vec::Vec;

use crate::common::Coord;
use crate::shot::ShotHistory;

/// Current protocol version for targeting-service frames.
pub const PROTOCOL_VERSION: u8 = 1;

/// Input to a targeting strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRequest {
    pub board_size: usize,
    pub hit_coordinates: Vec<Coord>,
    pub miss_coordinates: Vec<Coord>,
}

/// Answer from a targeting service. Coordinates are signed so that a
/// negative answer reaches validation instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetResponse {
    pub row: i64,
    pub column: i64,
    pub rationale: String,
}

impl From<&ShotHistory> for TargetRequest {
    fn from(history: &ShotHistory) -> Self {
        TargetRequest {
            board_size: history.board_size,
            hit_coordinates: history.hits.clone(),
            miss_coordinates: history.misses.clone(),
        }
    }
}

impl From<TargetRequest> for ShotHistory {
    fn from(req: TargetRequest) -> Self {
        ShotHistory {
            board_size: req.board_size,
            hits: req.hit_coordinates,
            misses: req.miss_coordinates,
        }
    }
}

/// Frames exchanged with a targeting service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Ask for the next target.
    TargetReq {
        version: u8,
        seq: u64,
        request: TargetRequest,
    },
    /// The service's choice for request `seq`.
    TargetResp {
        version: u8,
        seq: u64,
        response: TargetResponse,
    },
    /// The service could not answer request `seq`.
    Error { version: u8, seq: u64, reason: String },
}
