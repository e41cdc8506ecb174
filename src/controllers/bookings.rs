use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppError,
    validation::{ReserveRequest, ValidationReport},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings/reserve", post(reserve).fallback(super::not_found))
}

// POST /api/bookings/reserve
pub async fn reserve(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // Тело, которое не разобралось как JSON, считается ошибкой валидации
    let Json(body) = body.map_err(|rejection| ValidationReport::form(rejection.body_text()))?;
    let req = ReserveRequest::from_json(&body)?;

    let booking = state.bookings.reserve(req.event_id, &req.user_id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "data": booking }))))
}
