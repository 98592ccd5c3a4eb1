//! Event sync endpoints

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use certcal_core::{Event, EventInput};
use serde::Serialize;
use tracing::{info, warn};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/update-events", post(update_events))
        .route("/api/events", get(list_events))
}

/// Response from a sync
#[derive(Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub count: usize,
}

/// POST /api/update-events - Replace all stored events
///
/// Body is a JSON array of `{user, name, expiry}`; `null` clears the store.
async fn update_events(
    State(state): State<AppState>,
    Json(inputs): Json<Option<Vec<EventInput>>>,
) -> Result<Json<UpdateResponse>, AppError> {
    let inputs = inputs.unwrap_or_default();
    let submitted = inputs.len();

    let count = state
        .store
        .replace_all(inputs)
        .inspect_err(|e| warn!(error = %e, submitted, "rejected event sync"))?;

    info!(count, "events updated");

    Ok(Json(UpdateResponse {
        message: "Events updated".to_string(),
        count,
    }))
}

/// GET /api/events - Stored events in insertion order
async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.store.list_all())
}
