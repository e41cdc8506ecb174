use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub total_seats: i64,
}

// Событие в каталоге вместе с вычисленным остатком мест
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub total_seats: i64,
    pub seats_left: i64,
}
