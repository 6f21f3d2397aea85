//! Profile API Endpoints

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use super::AppState;
use crate::models::UserProfile;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/notifications", post(toggle_notifications))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.profile().await)
}

pub async fn toggle_notifications(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.toggle_notifications().await)
}
