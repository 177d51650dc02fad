//! Targeting backed by an external reasoning service, with a local
//! uniform-random fallback whenever the service cannot be trusted.

use std::fmt;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::time::{timeout, Duration};

use crate::{
    ai::{self, TargetChoice, TargetMode},
    common::GameError,
    config::RemoteConfig,
    protocol::{Message, TargetRequest, TargetResponse, PROTOCOL_VERSION},
    shot::ShotHistory,
    strategy::TargetingStrategy,
    transport::Transport,
};

/// Why a remote answer was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyServiceFailure {
    /// No answer within the configured deadline.
    Timeout(Duration),
    /// The call itself failed.
    Transport(String),
    /// The answer did not have the expected shape.
    Malformed(String),
    /// The answer names a cell outside the board.
    OutOfBounds { row: i64, column: i64 },
    /// The answer names a cell that was already fired upon.
    AlreadyFired { row: usize, col: usize },
}

impl fmt::Display for StrategyServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyServiceFailure::Timeout(d) => write!(f, "service timed out after {:?}", d),
            StrategyServiceFailure::Transport(e) => write!(f, "service call failed: {}", e),
            StrategyServiceFailure::Malformed(e) => write!(f, "malformed service response: {}", e),
            StrategyServiceFailure::OutOfBounds { row, column } => {
                write!(f, "service chose out-of-bounds cell ({}, {})", row, column)
            }
            StrategyServiceFailure::AlreadyFired { row, col } => {
                write!(f, "service chose already-fired cell ({}, {})", row, col)
            }
        }
    }
}

impl std::error::Error for StrategyServiceFailure {}

/// An external reasoning service answering target requests.
#[async_trait::async_trait]
pub trait ReasoningService: Send {
    async fn request_target(
        &mut self,
        request: &TargetRequest,
    ) -> Result<TargetResponse, StrategyServiceFailure>;
}

/// Check a service answer against the hard targeting contract.
pub fn validate_response(
    history: &ShotHistory,
    response: TargetResponse,
) -> Result<TargetChoice, StrategyServiceFailure> {
    let size = history.board_size as i64;
    if response.row < 0 || response.row >= size || response.column < 0 || response.column >= size {
        return Err(StrategyServiceFailure::OutOfBounds {
            row: response.row,
            column: response.column,
        });
    }
    let (row, col) = (response.row as usize, response.column as usize);
    match ai::check_target(history, row, col) {
        Ok(()) => Ok(TargetChoice {
            row,
            col,
            mode: TargetMode::Remote,
            rationale: response.rationale,
        }),
        Err(GameError::AlreadyFiredTarget { row, col }) => {
            Err(StrategyServiceFailure::AlreadyFired { row, col })
        }
        Err(_) => Err(StrategyServiceFailure::OutOfBounds {
            row: response.row,
            column: response.column,
        }),
    }
}

/// Strategy that asks a [`ReasoningService`] and falls back to a uniform
/// random pick among unfired cells when the call fails, times out, or
/// returns something outside the contract.
pub struct RemoteStrategy<S: ReasoningService> {
    service: S,
    timeout: Duration,
    rng: SmallRng,
    failures: usize,
}

impl<S: ReasoningService> RemoteStrategy<S> {
    pub fn new(service: S, config: RemoteConfig, rng: SmallRng) -> Self {
        Self {
            service,
            timeout: config.timeout,
            rng,
            failures: 0,
        }
    }

    pub fn seeded(service: S, config: RemoteConfig, seed: u64) -> Self {
        Self::new(service, config, SmallRng::seed_from_u64(seed))
    }

    /// Number of turns that used the fallback so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    async fn consult(&mut self, history: &ShotHistory) -> Result<TargetChoice, StrategyServiceFailure> {
        let request = TargetRequest::from(history);
        let response = timeout(self.timeout, self.service.request_target(&request))
            .await
            .map_err(|_| StrategyServiceFailure::Timeout(self.timeout))??;
        validate_response(history, response)
    }
}

#[async_trait::async_trait]
impl<S: ReasoningService> TargetingStrategy for RemoteStrategy<S> {
    async fn choose_target(&mut self, history: &ShotHistory) -> Result<TargetChoice, GameError> {
        match self.consult(history).await {
            Ok(choice) => {
                debug!("remote choice ({}, {}): {}", choice.row, choice.col, choice.rationale);
                Ok(choice)
            }
            Err(failure) => {
                self.failures += 1;
                warn!("{}; falling back to a local random pick", failure);
                ai::random_target(history, &mut self.rng)
            }
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// [`ReasoningService`] reached through a [`Transport`] using
/// sequence-numbered `TargetReq`/`TargetResp` frames.
pub struct TransportService<T: Transport> {
    transport: T,
    seq: u64,
}

impl<T: Transport> TransportService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, seq: 0 }
    }
}

#[async_trait::async_trait]
impl<T: Transport> ReasoningService for TransportService<T> {
    async fn request_target(
        &mut self,
        request: &TargetRequest,
    ) -> Result<TargetResponse, StrategyServiceFailure> {
        let seq = self.seq;
        self.seq += 1;
        self.transport
            .send(Message::TargetReq {
                version: PROTOCOL_VERSION,
                seq,
                request: request.clone(),
            })
            .await
            .map_err(|e| StrategyServiceFailure::Transport(e.to_string()))?;

        // a late answer to an abandoned request may still be queued
        loop {
            let reply = self
                .transport
                .recv()
                .await
                .map_err(|e| StrategyServiceFailure::Transport(e.to_string()))?;
            match reply {
                Message::TargetResp { seq: s, .. } | Message::Error { seq: s, .. } if s < seq => {
                    debug!("discarding stale reply for request {}", s);
                }
                Message::TargetResp {
                    version,
                    seq: s,
                    response,
                } if s == seq && version == PROTOCOL_VERSION => return Ok(response),
                Message::TargetResp { version, seq: s, .. } => {
                    return Err(StrategyServiceFailure::Malformed(format!(
                        "unexpected TargetResp (version {}, seq {}) for request {}",
                        version, s, seq
                    )))
                }
                Message::Error { reason, .. } => {
                    return Err(StrategyServiceFailure::Transport(reason))
                }
                other => {
                    return Err(StrategyServiceFailure::Malformed(format!(
                        "expected TargetResp, got {:?}",
                        other
                    )))
                }
            }
        }
    }
}
