//! SOS API Endpoints
//!
//! The trigger surface: read the alert state and press the SOS button.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use super::AppState;
use crate::services::AlertSnapshot;

/// Create SOS API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_alert))
        .route("/trigger", post(trigger))
}

/// Get current alert state
pub async fn get_alert(State(state): State<AppState>) -> Json<AlertSnapshot> {
    Json(state.alerts.snapshot())
}

/// Press the SOS button
pub async fn trigger(State(state): State<AppState>) -> Json<AlertSnapshot> {
    Json(state.alerts.trigger())
}
