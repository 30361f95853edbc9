//! Booking API endpoints.
//!
//! - Listing session types (GET /session-types)
//! - Submitting a booking (POST /bookings)

use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiState;
use crate::booking::{BookingRequest, SessionType, SessionTypeInfo};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::info;

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/session-types", get(session_types))
        .route("/bookings", post(create_booking))
        .with_state(state)
}

async fn session_types() -> Json<Value> {
    let types: Vec<SessionTypeInfo> = SessionType::ALL.iter().copied().map(Into::into).collect();
    Json(json!({ "session_types": types }))
}

async fn create_booking(
    State(state): State<ApiState>,
    Json(request): Json<BookingRequest>,
) -> ApiResult<Json<Value>> {
    request.validate()?;

    if state.directory.mentor(&request.mentor_id).is_none() {
        return Err(ApiError::not_found(format!(
            "Mentor {} not found",
            request.mentor_id
        )));
    }

    info!(
        "Booking request for mentor {} on {} at {}",
        request.mentor_id, request.date, request.start_time
    );

    let receipt = state.submitter.submit(&request).await?;

    Ok(Json(json!({
        "success": true,
        "reference": receipt.reference,
        "booking": receipt.booking,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support;
    use axum::http::StatusCode;

    fn request() -> BookingRequest {
        BookingRequest {
            mentor_id: "1".to_string(),
            mentor_name: "Dr. Jane Smith".to_string(),
            session_type: "Code Review".to_string(),
            date: "2026-10-20".to_string(),
            start_time: "10:00".to_string(),
            end_time: "10:45".to_string(),
        }
    }

    #[tokio::test]
    async fn test_catalog_lists_three_types() {
        let Json(body) = session_types().await;
        let types = body["session_types"].as_array().unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[2]["duration"], 60);
    }

    #[tokio::test]
    async fn test_valid_booking_returns_receipt() {
        let Json(body) = create_booking(State(test_support::state()), Json(request()))
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["booking"]["mentorId"], "1");
        assert!(body["reference"].is_string());
    }

    #[tokio::test]
    async fn test_inverted_times_are_rejected() {
        let mut bad = request();
        bad.end_time = "09:00".to_string();
        let err = create_booking(State(test_support::state()), Json(bad))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_mentor_is_not_found() {
        let mut bad = request();
        bad.mentor_id = "42".to_string();
        let err = create_booking(State(test_support::state()), Json(bad))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
