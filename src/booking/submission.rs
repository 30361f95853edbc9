//! Hand-off of confirmed bookings.
//!
//! The booking record is the only thing that leaves the selector. Where it
//! goes is up to the [`BookingSubmitter`]: the log, or an HTTP endpoint.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{BookingError, SessionType, TimeSlot};
use crate::directory::Mentor;

/// Record emitted when a booking is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub mentor_id: String,
    pub mentor_name: String,
    /// Display name of the session type.
    pub session_type: String,
    /// `yyyy-MM-dd`
    pub date: String,
    /// `HH:mm`
    pub start_time: String,
    /// `HH:mm`
    pub end_time: String,
}

impl BookingRequest {
    pub fn new(mentor: &Mentor, session_type: SessionType, slot: &TimeSlot) -> Self {
        Self {
            mentor_id: mentor.id.clone(),
            mentor_name: mentor.name.clone(),
            session_type: session_type.name().to_string(),
            date: slot.start.format("%Y-%m-%d").to_string(),
            start_time: slot.start_label(),
            end_time: slot.end_label(),
        }
    }

    /// Checks the record is well formed. Does not check availability.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.mentor_id.trim().is_empty() {
            return Err(BookingError::InvalidRequest("mentorId is empty".into()));
        }
        if SessionType::from_name(&self.session_type).is_none() {
            return Err(BookingError::UnknownSessionType(self.session_type.clone()));
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| BookingError::InvalidRequest(format!("date '{}': {}", self.date, e)))?;
        let start = parse_clock_time(&self.start_time, "startTime")?;
        let end = parse_clock_time(&self.end_time, "endTime")?;
        if end <= start {
            return Err(BookingError::InvalidRequest(format!(
                "endTime {} is not after startTime {}",
                self.end_time, self.start_time
            )));
        }
        Ok(())
    }
}

fn parse_clock_time(value: &str, field: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| BookingError::InvalidRequest(format!("{} '{}': {}", field, value, e)))
}

/// Acknowledgement returned for an accepted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub reference: Uuid,
    pub booking: BookingRequest,
}

impl BookingReceipt {
    pub fn issue(booking: BookingRequest) -> Self {
        Self {
            reference: Uuid::new_v4(),
            booking,
        }
    }
}

#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingReceipt, BookingError>;
}

/// Logs the booking and accepts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSubmitter;

#[async_trait]
impl BookingSubmitter for LoggingSubmitter {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingReceipt, BookingError> {
        request.validate()?;
        let receipt = BookingReceipt::issue(request.clone());
        info!(
            "Booking session {}: {} with {} ({}) on {} {}-{}",
            receipt.reference,
            request.session_type,
            request.mentor_name,
            request.mentor_id,
            request.date,
            request.start_time,
            request.end_time
        );
        Ok(receipt)
    }
}

/// POSTs the booking as JSON and expects a [`BookingReceipt`] back.
pub struct HttpBookingSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingSubmitter for HttpBookingSubmitter {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingReceipt, BookingError> {
        info!("Submitting booking to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| BookingError::Submission(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            return Err(BookingError::Submission(format!("{}: {}", status, message)));
        }

        response
            .json::<BookingReceipt>()
            .await
            .map_err(|e| BookingError::Submission(format!("invalid receipt: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn mentor() -> Mentor {
        Mentor {
            id: "1".to_string(),
            name: "Dr. Jane Smith".to_string(),
            avatar: "/placeholder.svg?height=200&width=200".to_string(),
            title: "Senior Software Engineer".to_string(),
            skills: vec!["React".to_string()],
            presence: Default::default(),
            last_message: None,
        }
    }

    fn slot() -> TimeSlot {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        TimeSlot::new(start, Duration::minutes(45))
    }

    #[test]
    fn test_request_formats_fields() {
        let request = BookingRequest::new(&mentor(), SessionType::CodeReview, &slot());
        assert_eq!(request.mentor_id, "1");
        assert_eq!(request.mentor_name, "Dr. Jane Smith");
        assert_eq!(request.session_type, "Code Review");
        assert_eq!(request.date, "2026-10-19");
        assert_eq!(request.start_time, "14:30");
        assert_eq!(request.end_time, "15:15");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_uses_camel_case_keys() {
        let request = BookingRequest::new(&mentor(), SessionType::Mentoring, &slot());
        let json = serde_json::to_value(&request).unwrap();
        for key in [
            "mentorId",
            "mentorName",
            "sessionType",
            "date",
            "startTime",
            "endTime",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        let good = BookingRequest::new(&mentor(), SessionType::Mentoring, &slot());

        let mut bad_type = good.clone();
        bad_type.session_type = "Pairing".into();
        assert!(matches!(
            bad_type.validate(),
            Err(BookingError::UnknownSessionType(_))
        ));

        let mut bad_date = good.clone();
        bad_date.date = "19/10/2026".into();
        assert!(bad_date.validate().is_err());

        let mut reversed = good.clone();
        reversed.end_time = "09:00".into();
        assert!(reversed.validate().is_err());

        let mut no_mentor = good;
        no_mentor.mentor_id = " ".into();
        assert!(no_mentor.validate().is_err());
    }

    #[tokio::test]
    async fn test_logging_submitter_issues_receipt() {
        let request = BookingRequest::new(&mentor(), SessionType::CareerGuidance, &slot());
        let receipt = LoggingSubmitter.submit(&request).await.unwrap();
        assert_eq!(receipt.booking, request);
    }
}
