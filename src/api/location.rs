//! Location Sharing API Endpoints

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use super::AppState;
use crate::models::LocationStatus;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_location))
        .route("/sharing", post(toggle_sharing))
        .route("/share", post(share_once))
}

pub async fn get_location(State(state): State<AppState>) -> Json<LocationStatus> {
    Json(state.location.status().await)
}

pub async fn toggle_sharing(State(state): State<AppState>) -> Json<LocationStatus> {
    Json(state.location.toggle_sharing().await)
}

pub async fn share_once(State(state): State<AppState>) -> Json<LocationStatus> {
    Json(state.location.share_once().await)
}
