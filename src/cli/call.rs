//! CLI handler for video calls.
//!
//! Sets up a call session on the host's devices, then reads single-letter
//! commands from stdin until the call ends.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use super::CallCliArgs;
use crate::call::{CallDeps, CallSession, DeviceCapture, LogOnlySignaling, PeerConnector};
use crate::config::Config;
use crate::navigation::{LoggingNavigator, Route};

pub async fn handle_call_command(args: CallCliArgs) -> Result<()> {
    let config = Config::load()?;
    let connector = peer_connector()?;

    let room_id = args.room.unwrap_or_else(|| Uuid::new_v4().to_string());
    let route = Route::Call {
        room_id: room_id.clone(),
    };
    info!("Opening {}", route);

    let deps = CallDeps {
        capture: Arc::new(DeviceCapture::new(config.call.video_device.clone())),
        connector,
        signaling: Arc::new(LogOnlySignaling::new(room_id.clone())),
        navigator: Arc::new(LoggingNavigator),
    };
    let mut session = CallSession::new(room_id, config.call.rtc_config(), deps);

    let spinner = create_spinner();
    spinner.set_message("Connecting...");
    let started = session.start().await;
    spinner.finish_and_clear();

    if let Err(e) = started {
        bail!("Could not start the call: {}", e);
    }

    println!("Waiting for the other side to join room {}", session.room_id());
    println!("Commands: [m] mute/unmute  [v] video on/off  [q] end call");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            more = session.process_next_event() => {
                if !more {
                    break;
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !apply_control(&session, line.trim()) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.end_call().await;
    println!("Call ended.");
    Ok(())
}

/// Returns `false` when the user asked to hang up.
fn apply_control(session: &CallSession, command: &str) -> bool {
    let result = match command {
        "m" => session
            .toggle_audio()
            .map(|on| if on { "Microphone on" } else { "Muted" }),
        "v" => session
            .toggle_video()
            .map(|on| if on { "Camera on" } else { "Camera off" }),
        "q" => return false,
        "" => return true,
        other => {
            println!("Unknown command '{}'", other);
            return true;
        }
    };

    match result {
        Ok(message) => println!("{}", message),
        Err(e) => println!("{}", e),
    }
    true
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(feature = "webrtc")]
fn peer_connector() -> Result<Arc<dyn PeerConnector>> {
    Ok(Arc::new(crate::call::RtcPeerConnector))
}

#[cfg(not(feature = "webrtc"))]
fn peer_connector() -> Result<Arc<dyn PeerConnector>> {
    bail!("mentorlink was built without call support; rebuild with `--features webrtc`")
}
