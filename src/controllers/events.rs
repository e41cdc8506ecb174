use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{error::AppError, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).fallback(super::not_found))
}

// GET /api/events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let events = state.bookings.list_events().await?;

    Ok(Json(json!({ "ok": true, "data": events })))
}
