//! Dashboard and profile endpoints.
//!
//! - Mentee dashboard summary (GET /dashboard)
//! - Mentor dashboard summary (GET /mentor/dashboard)
//! - Mentee profile (GET /mentees/:username)

use crate::api::error::{ApiError, ApiResult};
use crate::api::ApiState;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/mentor/dashboard", get(mentor_dashboard))
        .route("/mentees/:username", get(mentee_profile))
        .with_state(state)
}

async fn dashboard(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "upcoming_sessions": state.directory.upcoming_sessions(),
        "learning_progress": state.directory.learning_progress(),
        "recent_messages": state.directory.recent_messages(),
        "mentors": state.directory.mentors(),
    }))
}

async fn mentor_dashboard(State(state): State<ApiState>) -> Json<Value> {
    Json(json!({
        "stats": state.directory.mentor_stats(),
        "upcoming_sessions": state.directory.mentor_sessions(),
        "recent_messages": state.directory.mentor_messages(),
    }))
}

async fn mentee_profile(
    State(state): State<ApiState>,
    Path(username): Path<String>,
) -> ApiResult<Json<Value>> {
    let profile = state
        .directory
        .mentee(&username)
        .ok_or_else(|| ApiError::not_found(format!("Mentee {} not found", username)))?;
    Ok(Json(json!(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_dashboard_carries_progress_and_messages() {
        let Json(body) = dashboard(State(test_support::state())).await;
        assert_eq!(body["learning_progress"].as_array().unwrap().len(), 4);
        assert_eq!(body["recent_messages"].as_array().unwrap().len(), 3);
        assert_eq!(body["mentors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mentor_dashboard_lists_mentees() {
        let Json(body) = mentor_dashboard(State(test_support::state())).await;

        let sessions = body["upcoming_sessions"].as_array().unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0]["mentee_name"], "Alice Johnson");
        assert_eq!(sessions[1]["topic"], "State Management");
        assert_eq!(sessions[2]["date"], "2023-05-20");

        let messages = body["recent_messages"].as_array().unwrap();
        assert_eq!(messages[0]["name"], "David Brown");
        assert_eq!(messages[2]["name"], "Frank Lee");

        assert_eq!(body["stats"]["total_mentees"], 12);
        assert_eq!(body["stats"]["upcoming_sessions"], 5);
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let Json(body) = mentee_profile(State(test_support::state()), Path("kushal".to_string()))
            .await
            .unwrap();
        assert_eq!(body["username"], "kushal");

        let err = mentee_profile(State(test_support::state()), Path("nobody".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
