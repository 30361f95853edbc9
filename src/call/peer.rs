//! Peer connection abstraction.
//!
//! Observers are registered when the connection is built: the connector is
//! handed a sender, and the connection reports remote tracks and local
//! network candidates through it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use super::media::MediaTrack;

pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServer {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtcConfig {
    pub ice_servers: Vec<IceServer>,
}

impl RtcConfig {
    pub fn with_stun_servers(urls: &[String]) -> Self {
        Self {
            ice_servers: vec![IceServer {
                urls: urls.to_vec(),
            }],
        }
    }
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self::with_stun_servers(&[DEFAULT_STUN_SERVER.to_string()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpKind,
    pub sdp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_mline_index: Option<u16>,
}

/// Media arriving from the far end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStream {
    pub id: String,
    pub track_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    RemoteTrack { stream_id: String, track_id: String },
    LocalCandidate(IceCandidate),
}

pub type PeerEventSender = mpsc::UnboundedSender<PeerEvent>;

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer connection setup failed: {0}")]
    Setup(String),

    #[error("failed to attach {track}: {reason}")]
    AddTrack { track: String, reason: String },

    #[error("failed to create offer: {0}")]
    Offer(String),

    #[error("failed to set local description: {0}")]
    LocalDescription(String),
}

#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_track(
        &self,
        track: Arc<dyn MediaTrack>,
        stream_id: &str,
    ) -> Result<(), PeerError>;

    async fn create_offer(&self) -> Result<SessionDescription, PeerError>;

    async fn set_local_description(&self, description: SessionDescription)
        -> Result<(), PeerError>;

    /// Releases the transport.
    async fn close(&self);
}

/// Builds peer connections.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(
        &self,
        config: &RtcConfig,
        events: PeerEventSender,
    ) -> Result<Box<dyn PeerConnection>, PeerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_single_stun_server() {
        let config = RtcConfig::default();
        assert_eq!(config.ice_servers.len(), 1);
        assert_eq!(
            config.ice_servers[0].urls,
            vec!["stun:stun.l.google.com:19302".to_string()]
        );
    }

    #[test]
    fn test_description_wire_shape() {
        let offer = SessionDescription {
            kind: SdpKind::Offer,
            sdp: "v=0".to_string(),
        };
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["type"], "offer");
        assert_eq!(json["sdp"], "v=0");
    }

    #[test]
    fn test_candidate_wire_shape() {
        let candidate = IceCandidate {
            candidate: "candidate:1 1 udp 2130706431 10.0.0.2 5000 typ host".to_string(),
            sdp_mid: Some("0".to_string()),
            sdp_mline_index: Some(0),
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["sdpMid"], "0");
        assert_eq!(json["sdpMLineIndex"], 0);
    }
}
