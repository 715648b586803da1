use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::services::approval::ApprovalFlow;
use crate::services::board::AnnouncementBoard;
use crate::services::sessions::SessionTracker;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub registrations: RegistrationHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationHealth {
    pub active_sessions: usize,
    pub pending_approvals: usize,
    pub open_announcements: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<SessionTracker>,
    pub approvals: Arc<ApprovalFlow>,
    pub board: Arc<AnnouncementBoard>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(
        tracker: Arc<SessionTracker>,
        approvals: Arc<ApprovalFlow>,
        board: Arc<AnnouncementBoard>,
    ) -> Self {
        let state = AppState {
            tracker,
            approvals,
            board,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        registrations: RegistrationHealth {
            active_sessions: state.tracker.active_sessions(),
            pending_approvals: state.approvals.pending_count(),
            open_announcements: state.board.open_count(),
        },
        uptime_seconds: uptime,
    })
}

// All state is in memory, so once the router is serving the bot is ready.
async fn readiness_check() -> Json<&'static str> {
    Json("ready")
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}
