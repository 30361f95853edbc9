//! REST API server for mentorlink.
//!
//! Provides HTTP endpoints for:
//! - The session-type catalog
//! - Mentors and their bookable slots
//! - Booking submission
//! - The mentee dashboard and profiles
//! - Per-mentor chat

pub mod error;
pub mod routes;

use crate::booking::{BookingSubmitter, SlotGenerator};
use crate::chat::ChatStore;
use crate::clock::Clock;
use crate::config::ServerConfig;
use crate::directory::MentorDirectory;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tracing::info;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct ApiState {
    pub directory: Arc<dyn MentorDirectory>,
    pub slots: Arc<Mutex<SlotGenerator>>,
    pub submitter: Arc<dyn BookingSubmitter>,
    pub chat: ChatStore,
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(
        directory: Arc<dyn MentorDirectory>,
        slots: SlotGenerator,
        submitter: Arc<dyn BookingSubmitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let chat = ChatStore::new(directory.clone(), clock.clone());
        Self {
            directory,
            slots: Arc::new(Mutex::new(slots)),
            submitter,
            chat,
            clock,
        }
    }
}

pub struct ApiServer {
    host: String,
    port: u16,
    state: ApiState,
}

impl ApiServer {
    pub fn new(state: ApiState, config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = router(self.state);

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("API server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /                      - Service info");
        info!("  GET  /version               - Get version info");
        info!("  GET  /session-types         - List session types");
        info!("  GET  /mentors               - List mentors");
        info!("  GET  /mentors/:id           - Get single mentor");
        info!("  GET  /mentors/:id/slots     - Bookable slots for a date");
        info!("  POST /bookings              - Submit a booking");
        info!("  GET  /dashboard             - Mentee dashboard");
        info!("  GET  /mentees/:username     - Mentee profile");
        info!("  GET  /chat/:mentor_id       - Conversation with a mentor");
        info!("  POST /chat/:mentor_id       - Send a message");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/version", get(version))
        .merge(routes::booking::router(state.clone()))
        .merge(routes::mentors::router(state.clone()))
        .merge(routes::dashboard::router(state.clone()))
        .nest("/chat", routes::chat::router(state))
        .layer(ServiceBuilder::new())
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "mentorlink",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "mentorlink"
    }))
}
