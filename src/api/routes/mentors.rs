//! Mentor API endpoints.
//!
//! - Listing mentors (GET /mentors)
//! - Getting a specific mentor (GET /mentors/:id)
//! - Bookable slots for a day (GET /mentors/:id/slots)

use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiState;
use crate::booking::{BookingError, SessionType, SessionTypeInfo, TimeSlot};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    /// `YYYY-MM-DD`, defaults to today.
    pub date: Option<String>,
    /// Session type id or slug, defaults to the first catalog entry.
    pub session_type: Option<String>,
    /// Skip availability and return every candidate.
    #[serde(default)]
    pub all: bool,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/mentors", get(list_mentors))
        .route("/mentors/:id", get(get_mentor))
        .route("/mentors/:id/slots", get(mentor_slots))
        .with_state(state)
}

async fn list_mentors(State(state): State<ApiState>) -> Json<Value> {
    let mentors = state.directory.mentors();
    Json(json!({
        "count": mentors.len(),
        "mentors": mentors,
    }))
}

async fn get_mentor(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let mentor = state
        .directory
        .mentor(&id)
        .ok_or_else(|| ApiError::not_found(format!("Mentor {} not found", id)))?;
    Ok(Json(json!(mentor)))
}

async fn mentor_slots(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> ApiResult<Json<Value>> {
    let mentor = state
        .directory
        .mentor(&id)
        .ok_or_else(|| ApiError::not_found(format!("Mentor {} not found", id)))?;

    let today = state.clock.today();
    let date = match query.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| ApiError::bad_request(format!("Invalid date '{}': {}", raw, e)))?,
        None => today,
    };
    if date < today {
        return Err(BookingError::DateInPast(date).into());
    }

    let session_type = match query.session_type.as_deref() {
        Some(raw) => raw.parse::<SessionType>()?,
        None => SessionType::default(),
    };

    let slots = {
        let mut generator = state.slots.lock().await;
        if query.all {
            generator.candidates(date, session_type.duration())
        } else {
            generator.generate(date, session_type.duration())
        }
    };
    debug!("{} slots for mentor {} on {}", slots.len(), mentor.id, date);

    Ok(Json(json!({
        "mentor_id": mentor.id,
        "date": date.format("%Y-%m-%d").to_string(),
        "session_type": SessionTypeInfo::from(session_type),
        "slots": slots.iter().map(slot_json).collect::<Vec<_>>(),
    })))
}

fn slot_json(slot: &TimeSlot) -> Value {
    json!({
        "start": slot.start_label(),
        "end": slot.end_label(),
    })
}
