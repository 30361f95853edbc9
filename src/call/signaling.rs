//! Signaling channel.
//!
//! Session descriptions and candidates leave the call through a
//! [`SignalingChannel`]; messages from the far end come back through it.
//! Transport is somebody else's problem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::info;

use super::peer::{IceCandidate, SdpKind, SessionDescription};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalMessage {
    Description(SessionDescription),
    Candidate(IceCandidate),
}

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("signaling channel closed")]
    Closed,
}

#[async_trait]
pub trait SignalingChannel: Send + Sync {
    async fn send(&self, message: SignalMessage) -> Result<(), SignalingError>;

    /// Next message from the far end, or `None` once the channel is done.
    async fn recv(&self) -> Option<SignalMessage>;
}

/// Writes outgoing messages to the log and never receives anything.
#[derive(Debug, Clone)]
pub struct LogOnlySignaling {
    room_id: String,
}

impl LogOnlySignaling {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
        }
    }
}

#[async_trait]
impl SignalingChannel for LogOnlySignaling {
    async fn send(&self, message: SignalMessage) -> Result<(), SignalingError> {
        match &message {
            SignalMessage::Description(desc) => {
                let label = match desc.kind {
                    SdpKind::Offer => "Offer",
                    SdpKind::Answer => "Answer",
                };
                info!(
                    "[room {}] {} created ({} bytes of SDP)",
                    self.room_id,
                    label,
                    desc.sdp.len()
                );
                info!("{}", desc.sdp);
            }
            SignalMessage::Candidate(candidate) => {
                info!(
                    "[room {}] New ICE candidate: {}",
                    self.room_id, candidate.candidate
                );
            }
        }
        Ok(())
    }

    async fn recv(&self) -> Option<SignalMessage> {
        None
    }
}

/// In-process channel pair: one end for the call, one for whatever carries
/// messages to the far end.
pub struct ChannelSignaling {
    outbound: mpsc::UnboundedSender<SignalMessage>,
    inbound: Mutex<mpsc::UnboundedReceiver<SignalMessage>>,
}

/// The transport side of a [`ChannelSignaling`].
pub struct SignalingEndpoint {
    pub outgoing: mpsc::UnboundedReceiver<SignalMessage>,
    pub incoming: mpsc::UnboundedSender<SignalMessage>,
}

impl ChannelSignaling {
    pub fn pair() -> (Self, SignalingEndpoint) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        (
            Self {
                outbound: out_tx,
                inbound: Mutex::new(in_rx),
            },
            SignalingEndpoint {
                outgoing: out_rx,
                incoming: in_tx,
            },
        )
    }
}

#[async_trait]
impl SignalingChannel for ChannelSignaling {
    async fn send(&self, message: SignalMessage) -> Result<(), SignalingError> {
        self.outbound
            .send(message)
            .map_err(|_| SignalingError::Closed)
    }

    async fn recv(&self) -> Option<SignalMessage> {
        self.inbound.lock().await.recv().await
    }
}
