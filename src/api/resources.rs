//! Crisis Resource API Endpoints

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use super::AppState;
use crate::error::AppResult;
use crate::models::{Resource, ResourceSection};

#[derive(Debug, Default, Deserialize)]
pub struct ResourceQuery {
    /// Kebab-case category name, e.g. `mental-health`
    pub category: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_resources))
        .route("/sections", get(list_sections))
        .route("/:id/call", post(call_resource))
        .route("/:id/website", post(open_website))
}

/// All resources, or those in `?category=`
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> AppResult<Json<Vec<Resource>>> {
    let resources = match query.category {
        Some(category) => state.resources.in_category(&category)?,
        None => state.resources.list(),
    };
    Ok(Json(resources))
}

/// Resources grouped under their category headings
pub async fn list_sections(State(state): State<AppState>) -> Json<Vec<ResourceSection>> {
    Json(state.resources.by_category())
}

pub async fn call_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Resource>> {
    Ok(Json(state.resources.call(&id)?))
}

pub async fn open_website(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Resource>> {
    Ok(Json(state.resources.open_website(&id)?))
}
