use crate::models::EventSummary;
use crate::services::BookingService;

const LIST_EVENTS: &str = r#"
    SELECT e.id, e.name, e.total_seats,
           (e.total_seats - IFNULL(b.cnt, 0)) AS seats_left
    FROM events e
    LEFT JOIN (
        SELECT event_id, COUNT(*) AS cnt
        FROM bookings
        GROUP BY event_id
    ) b ON b.event_id = e.id
    ORDER BY e.id
"#;

impl BookingService {
    /// All events in ascending id order, each with seats left recomputed
    /// from the bookings table.
    pub async fn list_events(&self) -> Result<Vec<EventSummary>, sqlx::Error> {
        sqlx::query_as::<_, EventSummary>(LIST_EVENTS)
            .fetch_all(&self.db.pool)
            .await
    }
}
