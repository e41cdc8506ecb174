pub mod events;
pub mod bookings;

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use serde_json::json;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(events::routes())
        .merge(bookings::routes())
}

// Ответ для всех несуществующих маршрутов
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "ok": false, "error": "Not found" })))
}
