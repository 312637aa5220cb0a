//! Supported states/cities lookups for the client pickers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Serialize)]
pub struct StatesResponse {
    pub states: Vec<String>,
}

#[derive(Serialize)]
pub struct CitiesResponse {
    pub state: String,
    pub cities: Vec<String>,
}

/// GET /api/states
pub async fn states_list(State(state): State<Arc<AppState>>) -> Json<StatesResponse> {
    Json(StatesResponse {
        states: state
            .catalog
            .states()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

/// GET /api/states/{state}/cities
pub async fn state_cities(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CitiesResponse>, (StatusCode, Json<Value>)> {
    let cities = state.catalog.cities(&name).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("state not found: {}", name) })),
        )
    })?;
    Ok(Json(CitiesResponse {
        state: name,
        cities: cities.to_vec(),
    }))
}
