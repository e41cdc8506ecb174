use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub user_id: String,
    // RFC 3339, UTC, миллисекунды
    pub created_at: String,
}
