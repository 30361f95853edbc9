//! Mentor directory.
//!
//! Everything the screens display about people and their schedules comes
//! through [`MentorDirectory`], so screens can run against fixtures or a
//! real backend without changing.

mod fixtures;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

pub use fixtures::FixtureDirectory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    #[default]
    Offline,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub presence: Presence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenteeProfile {
    pub id: String,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
    pub bio: String,
    pub interests: Vec<String>,
    /// Month-year label, e.g. "May 2023".
    pub joined: String,
    pub total_sessions: u32,
    pub learning_goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingSession {
    pub id: String,
    pub mentor_name: String,
    pub mentor_avatar: String,
    pub topic: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub name: String,
    /// 0..=100
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentMessage {
    pub name: String,
    pub avatar: String,
    pub message: String,
    /// Relative label, e.g. "2h ago".
    pub time: String,
}

/// A session on a mentor's own calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorSession {
    pub id: String,
    pub mentee_name: String,
    pub mentee_avatar: String,
    pub topic: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Headline numbers on the mentor dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorStats {
    pub total_mentees: u32,
    pub upcoming_sessions: u32,
    pub hours_mentored: u32,
    pub average_rating: f32,
}

/// Read-only access to mentors, mentees and their schedules.
pub trait MentorDirectory: Send + Sync {
    fn mentors(&self) -> Vec<Mentor>;

    fn mentor(&self, id: &str) -> Option<Mentor> {
        self.mentors().into_iter().find(|m| m.id == id)
    }

    fn mentee(&self, username: &str) -> Option<MenteeProfile>;

    /// Ordered by date, then time.
    fn upcoming_sessions(&self) -> Vec<UpcomingSession>;

    fn learning_progress(&self) -> Vec<SkillProgress>;

    fn recent_messages(&self) -> Vec<RecentMessage>;

    /// Mentor-side calendar, ordered by date, then time.
    fn mentor_sessions(&self) -> Vec<MentorSession>;

    /// Latest messages from mentees.
    fn mentor_messages(&self) -> Vec<RecentMessage>;

    fn mentor_stats(&self) -> MentorStats;

    /// Seed transcript for a conversation with `mentor_id`.
    fn chat_history(&self, mentor_id: &str) -> Vec<ChatMessage>;
}
