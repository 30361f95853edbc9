use crate::booking::{BookingError, WorkingWindow};
use crate::call::{RtcConfig, DEFAULT_STUN_SERVER};
use crate::global;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub booking: BookingConfig,
    pub call: CallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// `HH:MM`
    pub opens_at: String,
    /// `HH:MM`
    pub closes_at: String,
    pub slot_stride_minutes: u32,
    /// Share of candidate slots reported as taken (0.0 - 1.0).
    pub unavailable_ratio: f64,
    /// Where confirmed bookings are POSTed. Unset means they are only logged.
    pub submit_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CallConfig {
    pub stun_servers: Vec<String>,
    pub video_device: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4317,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opens_at: "09:00".to_string(),
            closes_at: "17:00".to_string(),
            slot_stride_minutes: 30,
            unavailable_ratio: 0.3,
            submit_url: None,
        }
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            stun_servers: vec![DEFAULT_STUN_SERVER.to_string()],
            video_device: PathBuf::from("/dev/video0"),
        }
    }
}

impl ServerConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl BookingConfig {
    pub fn working_window(&self) -> Result<WorkingWindow, BookingError> {
        let opens_at = parse_hhmm(&self.opens_at)?;
        let closes_at = parse_hhmm(&self.closes_at)?;
        WorkingWindow::new(
            opens_at,
            closes_at,
            Duration::minutes(i64::from(self.slot_stride_minutes)),
        )
    }
}

impl CallConfig {
    pub fn rtc_config(&self) -> RtcConfig {
        if self.stun_servers.is_empty() {
            RtcConfig::default()
        } else {
            RtcConfig::with_stun_servers(&self.stun_servers)
        }
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| BookingError::InvalidWindow(format!("'{}': {}", value, e)))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Reads `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_nine_to_five() {
        let window = BookingConfig::default().working_window().unwrap();
        assert_eq!(window, WorkingWindow::default());
    }

    #[test]
    fn test_invalid_hours_are_rejected() {
        let config = BookingConfig {
            opens_at: "9am".to_string(),
            ..Default::default()
        };
        assert!(config.working_window().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [booking]
            closes_at = "18:30"
            "#,
        )
        .unwrap();
        assert_eq!(config.booking.closes_at, "18:30");
        assert_eq!(config.booking.opens_at, "09:00");
        assert_eq!(config.server.port, 4317);
        assert_eq!(config.call.stun_servers, vec![DEFAULT_STUN_SERVER]);
    }

    #[test]
    fn test_empty_stun_list_falls_back() {
        let call = CallConfig {
            stun_servers: Vec::new(),
            ..Default::default()
        };
        assert_eq!(call.rtc_config(), RtcConfig::default());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.base_url(), "http://127.0.0.1:4317");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.booking.slot_stride_minutes, 30);
    }
}
