//! Serving side of the targeting protocol.

use log::{debug, warn};
use rand::rngs::SmallRng;

use crate::{
    ai,
    protocol::{Message, TargetResponse, PROTOCOL_VERSION},
    shot::ShotHistory,
    transport::Transport,
};

/// Serves the local hunt/target strategy to a remote peer: answers each
/// `TargetReq` with a `TargetResp`, or an `Error` frame when no target
/// exists or the request cannot be served.
pub struct TargetingSkeleton<T: Transport> {
    transport: T,
    rng: SmallRng,
}

impl<T: Transport> TargetingSkeleton<T> {
    pub fn new(transport: T, rng: SmallRng) -> Self {
        Self { transport, rng }
    }

    /// Serve until the peer goes away.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        while let Ok(msg) = self.transport.recv().await {
            let reply = match msg {
                Message::TargetReq { version, seq, .. } if version != PROTOCOL_VERSION => {
                    warn!("request {} uses protocol version {}", seq, version);
                    Message::Error {
                        version: PROTOCOL_VERSION,
                        seq,
                        reason: format!(
                            "Protocol version mismatch: expected {}, got {}",
                            PROTOCOL_VERSION, version
                        ),
                    }
                }
                Message::TargetReq { seq, request, .. } => {
                    let history = ShotHistory::from(request);
                    match ai::select_target(&history, &mut self.rng) {
                        Ok(choice) => {
                            debug!("request {} -> ({}, {})", seq, choice.row, choice.col);
                            Message::TargetResp {
                                version: PROTOCOL_VERSION,
                                seq,
                                response: TargetResponse {
                                    row: choice.row as i64,
                                    column: choice.col as i64,
                                    rationale: choice.rationale,
                                },
                            }
                        }
                        Err(e) => Message::Error {
                            version: PROTOCOL_VERSION,
                            seq,
                            reason: e.to_string(),
                        },
                    }
                }
                other => {
                    warn!("ignoring unexpected frame {:?}", other);
                    continue;
                }
            };
            self.transport.send(reply).await?;
        }
        Ok(())
    }
}
