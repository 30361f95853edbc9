//! The fixed catalog of mentoring session types.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Mentoring,
    CodeReview,
    CareerGuidance,
}

impl SessionType {
    pub const ALL: [SessionType; 3] = [
        SessionType::Mentoring,
        SessionType::CodeReview,
        SessionType::CareerGuidance,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Mentoring => "1",
            Self::CodeReview => "2",
            Self::CareerGuidance => "3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mentoring => "1-on-1 Mentoring",
            Self::CodeReview => "Code Review",
            Self::CareerGuidance => "Career Guidance",
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            Self::Mentoring => 30,
            Self::CodeReview => 45,
            Self::CareerGuidance => 60,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Mentoring => "Personal mentoring session",
            Self::CodeReview => "Review and discuss your code",
            Self::CareerGuidance => "Discuss career paths and opportunities",
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes()))
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} min)", self.name(), self.duration_minutes())
    }
}

/// Accepts the catalog id (`"2"`) or a slug (`code-review`, `code_review`).
impl FromStr for SessionType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(found) = Self::from_id(trimmed) {
            return Ok(found);
        }
        match trimmed.to_ascii_lowercase().replace('-', "_").as_str() {
            "mentoring" => Ok(Self::Mentoring),
            "code_review" => Ok(Self::CodeReview),
            "career_guidance" => Ok(Self::CareerGuidance),
            _ => Err(BookingError::UnknownSessionType(s.to_string())),
        }
    }
}

/// Wire shape for listing the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTypeInfo {
    pub id: String,
    pub name: String,
    pub duration: u32,
    pub description: String,
}

impl From<SessionType> for SessionTypeInfo {
    fn from(t: SessionType) -> Self {
        Self {
            id: t.id().to_string(),
            name: t.name().to_string(),
            duration: t.duration_minutes(),
            description: t.description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_durations() {
        let durations: Vec<u32> = SessionType::ALL
            .iter()
            .map(|t| t.duration_minutes())
            .collect();
        assert_eq!(durations, vec![30, 45, 60]);
    }

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(SessionType::default(), SessionType::ALL[0]);
    }

    #[test]
    fn test_parse_by_id_and_slug() {
        assert_eq!("2".parse::<SessionType>().unwrap(), SessionType::CodeReview);
        assert_eq!(
            "career-guidance".parse::<SessionType>().unwrap(),
            SessionType::CareerGuidance
        );
        assert!("4".parse::<SessionType>().is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            SessionType::from_name("Code Review"),
            Some(SessionType::CodeReview)
        );
        assert_eq!(SessionType::from_name("Pairing"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SessionType::CodeReview).unwrap();
        assert_eq!(json, "\"code_review\"");
    }
}
