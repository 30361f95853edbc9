//! Chat API endpoints, nested under `/chat`.
//!
//! - Reading a conversation (GET /chat/:mentor_id)
//! - Sending a message as the mentee (POST /chat/:mentor_id)

use crate::api::error::ApiResult;
use crate::api::ApiState;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/:mentor_id", get(get_conversation).post(send_message))
        .with_state(state)
}

async fn get_conversation(
    State(state): State<ApiState>,
    Path(mentor_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let conversation = state.chat.conversation(&mentor_id).await?;
    Ok(Json(json!(conversation)))
}

async fn send_message(
    State(state): State<ApiState>,
    Path(mentor_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<Value>> {
    let message = state.chat.send(&mentor_id, &req.content).await?;
    Ok(Json(json!({
        "success": true,
        "message": message,
        "timestamp_label": message.timestamp_label(),
    })))
}
