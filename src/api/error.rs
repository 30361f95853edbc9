//! API error handling for consistent JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::booking::BookingError;
use crate::chat::ChatError;

/// API error type that converts to JSON responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": true,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::DateInPast(_)
            | BookingError::UnknownSessionType(_)
            | BookingError::UnknownSlot(_)
            | BookingError::NoSlotChosen
            | BookingError::InvalidRequest(_) => Self::bad_request(err.to_string()),
            BookingError::Submission(_) => Self::new(StatusCode::BAD_GATEWAY, err.to_string()),
            BookingError::InvalidWindow(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => Self::bad_request(err.to_string()),
            ChatError::UnknownMentor(_) => Self::not_found(err.to_string()),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_booking_errors_map_to_client_or_gateway() {
        let past = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            ApiError::from(BookingError::DateInPast(past)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(BookingError::Submission("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_unknown_mentor_is_not_found() {
        let err = ApiError::from(ChatError::UnknownMentor("9".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "unknown mentor: 9");
    }
}
