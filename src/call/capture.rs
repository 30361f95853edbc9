//! Capture backed by the host's devices.
//!
//! Audio comes from the default cpal input device, video from a V4L-style
//! device node. Each track owns its device for as long as it is live:
//! the microphone track keeps the running input stream, the camera track
//! keeps the open device handle. `stop()` releases both.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::media::{
    FlagTrack, LocalStream, MediaCapture, MediaConstraints, MediaError, MediaTrack, TrackKind,
    TrackState,
};

const MIC_SAMPLE_RATE: u32 = 48_000;

type MicReady = oneshot::Sender<Result<String, MediaError>>;

struct MicWorker {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Microphone track. `cpal::Stream` is not `Send`, so the stream lives on a
/// dedicated thread that holds it until the track is stopped.
pub struct MicTrack {
    flags: Arc<FlagTrack>,
    frames: Arc<AtomicU64>,
    worker: Mutex<Option<MicWorker>>,
}

impl MicTrack {
    /// Opens the default input device and starts the stream.
    pub async fn open(id: impl Into<String>) -> Result<(Self, String), MediaError> {
        Self::spawn(id, run_mic).await
    }

    async fn spawn<F>(id: impl Into<String>, body: F) -> Result<(Self, String), MediaError>
    where
        F: FnOnce(Arc<FlagTrack>, Arc<AtomicU64>, MicReady, mpsc::Receiver<()>) + Send + 'static,
    {
        let flags = Arc::new(FlagTrack::new(id, TrackKind::Audio));
        let frames = Arc::new(AtomicU64::new(0));
        let (ready_tx, ready_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("mentorlink-mic".to_string())
            .spawn({
                let flags = flags.clone();
                let frames = frames.clone();
                move || body(flags, frames, ready_tx, stop_rx)
            })
            .map_err(|e| MediaError::Platform(format!("cannot start audio thread: {}", e)))?;

        let name = match ready_rx.await {
            Ok(Ok(name)) => name,
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(MediaError::Platform(
                    "audio thread exited before the stream started".to_string(),
                ));
            }
        };

        let track = Self {
            flags,
            frames,
            worker: Mutex::new(Some(MicWorker { stop_tx, handle })),
        };
        Ok((track, name))
    }

    /// Samples delivered while the track was enabled.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

fn run_mic(
    flags: Arc<FlagTrack>,
    frames: Arc<AtomicU64>,
    ready: MicReady,
    stop: mpsc::Receiver<()>,
) {
    let stream = match open_input_stream(flags, frames) {
        Ok((stream, name)) => {
            let _ = ready.send(Ok(name));
            stream
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    // Returns once the sender is dropped.
    let _ = stop.recv();
    debug!("Releasing microphone stream");
    drop(stream);
}

fn open_input_stream(
    flags: Arc<FlagTrack>,
    frames: Arc<AtomicU64>,
) -> Result<(cpal::Stream, String), MediaError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(MediaError::DeviceNotFound(TrackKind::Audio))?;
    let name = device.name().unwrap_or_else(|_| "unknown".to_string());

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(MIC_SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };
    let err_fn = |err| error!("Microphone stream error: {}", err);

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if flags.is_enabled() {
                    frames.fetch_add(data.len() as u64, Ordering::Relaxed);
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| MediaError::Platform(format!("cannot open {}: {}", name, e)))?;
    stream
        .play()
        .map_err(|e| MediaError::Platform(format!("cannot start {}: {}", name, e)))?;

    Ok((stream, name))
}

impl MediaTrack for MicTrack {
    fn id(&self) -> &str {
        self.flags.id()
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Audio
    }

    fn is_enabled(&self) -> bool {
        self.flags.is_enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.flags.set_enabled(enabled);
    }

    fn state(&self) -> TrackState {
        self.flags.state()
    }

    fn stop(&self) {
        self.flags.stop();
        let worker = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(worker) = worker {
            drop(worker.stop_tx);
            if worker.handle.join().is_err() {
                warn!("Audio thread for {} panicked", self.flags.id());
            }
        }
    }
}

impl Drop for MicTrack {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Camera track. Holds the device node open until stopped.
pub struct CameraTrack {
    flags: FlagTrack,
    device: Mutex<Option<std::fs::File>>,
}

impl CameraTrack {
    pub async fn open(id: impl Into<String>, path: &Path) -> Result<Self, MediaError> {
        let file = match tokio::fs::OpenOptions::new().read(true).open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MediaError::DeviceNotFound(TrackKind::Video))
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(MediaError::PermissionDenied(format!(
                    "camera at {}",
                    path.display()
                )))
            }
            Err(e) => {
                return Err(MediaError::Platform(format!(
                    "cannot open {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            flags: FlagTrack::new(id, TrackKind::Video),
            device: Mutex::new(Some(file.into_std().await)),
        })
    }

    /// Whether the device handle is still held.
    pub fn is_claimed(&self) -> bool {
        self.device
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl MediaTrack for CameraTrack {
    fn id(&self) -> &str {
        self.flags.id()
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Video
    }

    fn is_enabled(&self) -> bool {
        self.flags.is_enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.flags.set_enabled(enabled);
    }

    fn state(&self) -> TrackState {
        self.flags.state()
    }

    fn stop(&self) {
        self.flags.stop();
        let file = match self.device.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if file.is_some() {
            debug!("Released camera for {}", self.flags.id());
        }
    }
}

pub struct DeviceCapture {
    video_device: PathBuf,
}

impl DeviceCapture {
    pub fn new(video_device: impl Into<PathBuf>) -> Self {
        Self {
            video_device: video_device.into(),
        }
    }
}

#[async_trait]
impl MediaCapture for DeviceCapture {
    async fn acquire(&self, constraints: MediaConstraints) -> Result<LocalStream, MediaError> {
        let stream_id = Uuid::new_v4().to_string();
        let mut tracks: Vec<Arc<dyn MediaTrack>> = Vec::new();

        if constraints.audio {
            let (mic, name) = MicTrack::open(format!("{}-audio", stream_id)).await?;
            info!("Capturing audio from {}", name);
            tracks.push(Arc::new(mic));
        }

        if constraints.video {
            // A failure here drops the microphone track, which releases it.
            let camera = match CameraTrack::open(format!("{}-video", stream_id), &self.video_device)
                .await
            {
                Ok(camera) => camera,
                Err(e) => {
                    warn!("Camera unavailable: {}", e);
                    return Err(e);
                }
            };
            info!("Capturing video from {}", self.video_device.display());
            tracks.push(Arc::new(camera));
        }

        Ok(LocalStream::new(stream_id, tracks))
    }
}
