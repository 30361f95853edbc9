//! Call session lifecycle.
//!
//! start → acquire media → build peer → attach tracks → offer → awaiting answer
//!
//! The offer and local candidates go out through the signaling channel. No
//! answer is ever applied, so the session never reaches a connected state.
//! Local tracks and the peer connection are released exactly once, on
//! whichever exit path comes first: `end_call`, `teardown` or drop. Drop
//! cannot await, so it hands the peer close to the runtime.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::media::{LocalStream, MediaCapture, MediaConstraints, MediaError, TrackKind};
use super::peer::{
    PeerConnection, PeerConnector, PeerError, PeerEvent, RemoteStream, RtcConfig, SdpKind,
};
use super::signaling::{SignalMessage, SignalingChannel, SignalingError};
use crate::navigation::{Navigator, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    Idle,
    Acquiring,
    /// Offer is out; nothing ever answers it.
    AwaitingAnswer,
    /// Setup failed; the screen stays up with nothing to show.
    Inert,
    Ended,
}

impl CallPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::AwaitingAnswer => "awaiting_answer",
            Self::Inert => "inert",
            Self::Ended => "ended",
        }
    }
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error("call already started (phase: {})", .0.as_str())]
    AlreadyStarted(CallPhase),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Peer(#[from] PeerError),

    #[error(transparent)]
    Signaling(#[from] SignalingError),

    #[error("no local media stream")]
    NoLocalStream,

    #[error("local stream has no {} track", .0.as_str())]
    MissingTrack(TrackKind),
}

/// Collaborators a call session needs.
pub struct CallDeps {
    pub capture: Arc<dyn MediaCapture>,
    pub connector: Arc<dyn PeerConnector>,
    pub signaling: Arc<dyn SignalingChannel>,
    pub navigator: Arc<dyn Navigator>,
}

pub struct CallSession {
    room_id: String,
    config: RtcConfig,
    deps: CallDeps,
    phase: CallPhase,
    local_stream: Option<LocalStream>,
    remote_stream: Option<RemoteStream>,
    peer: Option<Box<dyn PeerConnection>>,
    events: Option<mpsc::UnboundedReceiver<PeerEvent>>,
    released: bool,
}

impl CallSession {
    pub fn new(room_id: impl Into<String>, config: RtcConfig, deps: CallDeps) -> Self {
        Self {
            room_id: room_id.into(),
            config,
            deps,
            phase: CallPhase::Idle,
            local_stream: None,
            remote_stream: None,
            peer: None,
            events: None,
            released: false,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    /// Stream shown in the local preview.
    pub fn local_stream(&self) -> Option<&LocalStream> {
        self.local_stream.as_ref()
    }

    /// Stream shown in the remote preview.
    pub fn remote_stream(&self) -> Option<&RemoteStream> {
        self.remote_stream.as_ref()
    }

    pub fn has_peer(&self) -> bool {
        self.peer.is_some()
    }

    /// Acquires media and publishes a local offer. Failures are logged and
    /// leave the session inert; nothing is retried.
    pub async fn start(&mut self) -> Result<(), CallError> {
        if self.phase != CallPhase::Idle {
            return Err(CallError::AlreadyStarted(self.phase));
        }

        info!("Starting call in room {}", self.room_id);
        self.phase = CallPhase::Acquiring;

        match self.setup().await {
            Ok(()) => {
                self.phase = CallPhase::AwaitingAnswer;
                info!("Room {}: offer published, awaiting answer", self.room_id);
                Ok(())
            }
            Err(e) => {
                error!("Error starting the call: {}", e);
                self.phase = CallPhase::Inert;
                Err(e)
            }
        }
    }

    async fn setup(&mut self) -> Result<(), CallError> {
        let stream = self
            .deps
            .capture
            .acquire(MediaConstraints::audio_video())
            .await?;
        info!(
            "Local stream {} attached to preview ({} tracks)",
            stream.id(),
            stream.tracks().len()
        );
        self.local_stream = Some(stream.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        let peer = self.deps.connector.connect(&self.config, tx).await?;
        self.events = Some(rx);
        let peer = self.peer.insert(peer);

        for track in stream.tracks() {
            peer.add_track(Arc::clone(track), stream.id()).await?;
            debug!("Attached {} track {}", track.kind().as_str(), track.id());
        }

        let offer = peer.create_offer().await?;
        peer.set_local_description(offer.clone()).await?;
        self.deps
            .signaling
            .send(SignalMessage::Description(offer))
            .await?;
        Ok(())
    }

    /// Handles one peer event. Returns `false` once the peer side is gone.
    pub async fn process_next_event(&mut self) -> bool {
        let Some(events) = self.events.as_mut() else {
            return false;
        };
        match events.recv().await {
            Some(event) => {
                self.handle_event(event).await;
                true
            }
            None => false,
        }
    }

    /// Handles every event already queued, without waiting.
    pub async fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let event = match self.events.as_mut().map(|rx| rx.try_recv()) {
                Some(Ok(event)) => event,
                _ => break,
            };
            self.handle_event(event).await;
            handled += 1;
        }
        handled
    }

    async fn handle_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::RemoteTrack {
                stream_id,
                track_id,
            } => {
                let remote = self.remote_stream.get_or_insert_with(|| RemoteStream {
                    id: stream_id.clone(),
                    track_ids: Vec::new(),
                });
                if remote.id != stream_id {
                    info!("Remote preview switched to stream {}", stream_id);
                    *remote = RemoteStream {
                        id: stream_id,
                        track_ids: Vec::new(),
                    };
                }
                remote.track_ids.push(track_id);
                info!(
                    "Remote stream {} attached ({} tracks)",
                    remote.id,
                    remote.track_ids.len()
                );
            }
            PeerEvent::LocalCandidate(candidate) => {
                if let Err(e) = self
                    .deps
                    .signaling
                    .send(SignalMessage::Candidate(candidate))
                    .await
                {
                    warn!("Failed to forward ICE candidate: {}", e);
                }
            }
        }
    }

    /// Reads one message from the far end. Remote descriptions and
    /// candidates are reported but not applied.
    pub async fn receive_remote_signal(&self) -> Option<SignalMessage> {
        let message = self.deps.signaling.recv().await?;
        match &message {
            SignalMessage::Description(desc) if desc.kind == SdpKind::Answer => {
                warn!(
                    "Room {}: received an answer, but answers are not applied",
                    self.room_id
                );
            }
            SignalMessage::Description(_) => {
                warn!("Room {}: ignoring remote offer", self.room_id);
            }
            SignalMessage::Candidate(c) => {
                debug!("Room {}: ignoring remote candidate {}", self.room_id, c.candidate);
            }
        }
        Some(message)
    }

    /// Flips the first audio track. Returns whether audio is now enabled.
    pub fn toggle_audio(&self) -> Result<bool, CallError> {
        self.toggle(TrackKind::Audio)
    }

    /// Flips the first video track. Returns whether video is now enabled.
    pub fn toggle_video(&self) -> Result<bool, CallError> {
        self.toggle(TrackKind::Video)
    }

    fn toggle(&self, kind: TrackKind) -> Result<bool, CallError> {
        let stream = self.local_stream.as_ref().ok_or(CallError::NoLocalStream)?;
        let track = stream
            .first_track(kind)
            .ok_or(CallError::MissingTrack(kind))?;
        let enabled = !track.is_enabled();
        track.set_enabled(enabled);
        info!(
            "{} {}",
            kind.as_str(),
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(enabled)
    }

    pub fn is_muted(&self) -> bool {
        self.track_enabled(TrackKind::Audio) == Some(false)
    }

    pub fn is_video_off(&self) -> bool {
        self.track_enabled(TrackKind::Video) == Some(false)
    }

    fn track_enabled(&self, kind: TrackKind) -> Option<bool> {
        self.local_stream
            .as_ref()
            .and_then(|s| s.first_track(kind))
            .map(|t| t.is_enabled())
    }

    /// Releases everything and returns to the landing screen.
    pub async fn end_call(&mut self) {
        self.teardown().await;
        self.deps.navigator.navigate(Route::Landing);
    }

    /// Stops local tracks and closes the peer connection. Idempotent.
    pub async fn teardown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.stop_local_tracks();
        if let Some(peer) = self.peer.as_ref() {
            peer.close().await;
            debug!("Peer connection closed");
        }
        self.events = None;
        self.phase = CallPhase::Ended;
        info!("Call in room {} torn down", self.room_id);
    }

    fn stop_local_tracks(&self) {
        if let Some(stream) = self.local_stream.as_ref() {
            stream.stop_all();
            debug!("Stopped {} local tracks", stream.tracks().len());
        }
    }
}

impl Drop for CallSession {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        debug!("Dropping live CallSession, cleaning up");

        self.stop_local_tracks();
        self.events = None;
        self.phase = CallPhase::Ended;

        // Drop cannot await, so the close runs on the current runtime.
        if let Some(peer) = self.peer.take() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        peer.close().await;
                        debug!("Peer connection closed after drop");
                    });
                }
                Err(_) => debug!("No runtime to close peer connection on; dropping it"),
            }
        }
    }
}
