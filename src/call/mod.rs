//! Peer-to-peer video call.
//!
//! Acquires local audio/video, builds a peer connection against a STUN
//! server, publishes an offer through a signaling channel, and exposes the
//! mute/video/end-call controls.

pub mod capture;
pub mod media;
pub mod peer;
#[cfg(feature = "webrtc")]
pub mod rtc;
pub mod session;
pub mod signaling;

pub use capture::{CameraTrack, DeviceCapture, MicTrack};
pub use media::{
    FlagTrack, LocalStream, MediaCapture, MediaConstraints, MediaError, MediaTrack, TrackKind,
    TrackState,
};
pub use peer::{
    IceCandidate, IceServer, PeerConnection, PeerConnector, PeerError, PeerEvent,
    PeerEventSender, RemoteStream, RtcConfig, SdpKind, SessionDescription, DEFAULT_STUN_SERVER,
};
#[cfg(feature = "webrtc")]
pub use rtc::RtcPeerConnector;
pub use session::{CallDeps, CallError, CallPhase, CallSession};
pub use signaling::{
    ChannelSignaling, LogOnlySignaling, SignalMessage, SignalingChannel, SignalingEndpoint,
    SignalingError,
};
