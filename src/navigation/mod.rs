//! Named screens and the facility that moves between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    Landing,
    MentorDashboard,
    MenteeDashboard,
    MenteeProfile { username: String },
    Booking { mentor_id: String },
    Chat,
    Call { room_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::MentorDashboard => "/mentor/dashboard".to_string(),
            Self::MenteeDashboard => "/mentee/dashboard".to_string(),
            Self::MenteeProfile { username } => format!("/mentee/{}", username),
            Self::Booking { mentor_id } => format!("/book/{}", mentor_id),
            Self::Chat => "/chat".to_string(),
            Self::Call { room_id } => format!("/call/{}", room_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no screen at path '{0}'")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Self::Landing),
            ["mentor", "dashboard"] => Ok(Self::MentorDashboard),
            ["mentee", "dashboard"] => Ok(Self::MenteeDashboard),
            ["mentee", username] => Ok(Self::MenteeProfile {
                username: username.to_string(),
            }),
            ["book", mentor_id] => Ok(Self::Booking {
                mentor_id: mentor_id.to_string(),
            }),
            ["chat"] => Ok(Self::Chat),
            ["call", room_id] => Ok(Self::Call {
                room_id: room_id.to_string(),
            }),
            _ => Err(UnknownRoute(path.to_string())),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Reports navigation in the log; the terminal has no screens to switch.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
    }
}
