//! Emergency Contact API Endpoints

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};

use super::AppState;
use crate::error::AppResult;
use crate::models::EmergencyContact;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts))
        .route("/:id", get(get_contact).delete(remove_contact))
        .route("/:id/call", post(call_contact))
        .route("/:id/message", post(message_contact))
}

pub async fn list_contacts(State(state): State<AppState>) -> Json<Vec<EmergencyContact>> {
    Json(state.contacts.list().await)
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmergencyContact>> {
    Ok(Json(state.contacts.get(&id).await?))
}

/// Remove a contact; responds with the removed record
pub async fn remove_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmergencyContact>> {
    Ok(Json(state.contacts.remove(&id).await?))
}

pub async fn call_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmergencyContact>> {
    Ok(Json(state.contacts.call(&id).await?))
}

pub async fn message_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmergencyContact>> {
    Ok(Json(state.contacts.message(&id).await?))
}
