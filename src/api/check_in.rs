//! Check-in API Endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};

use super::AppState;
use crate::models::{CheckIn, CheckInSchedule};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_check_ins).post(check_in))
        .route("/schedule", get(get_schedule).post(toggle_schedule))
}

/// Check-in history, newest first
pub async fn list_check_ins(State(state): State<AppState>) -> Json<Vec<CheckIn>> {
    Json(state.check_ins.history().await)
}

/// Record a check-in now
pub async fn check_in(State(state): State<AppState>) -> (StatusCode, Json<CheckIn>) {
    (StatusCode::CREATED, Json(state.check_ins.check_in().await))
}

pub async fn get_schedule(State(state): State<AppState>) -> Json<CheckInSchedule> {
    Json(state.check_ins.schedule().await)
}

/// Turn automatic check-ins on or off
pub async fn toggle_schedule(State(state): State<AppState>) -> Json<CheckInSchedule> {
    Json(state.check_ins.toggle_schedule().await)
}
