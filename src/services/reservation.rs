use chrono::{SecondsFormat, Utc};
use tracing::{debug, info};

use crate::models::{Booking, Event};
use crate::services::BookingService;

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Event not found")]
    EventNotFound,
    #[error("User already booked this event")]
    AlreadyBooked,
    #[error("Event is sold out")]
    SoldOut,
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl BookingService {
    /// Reserves one seat at `event_id` for `user_id`.
    ///
    /// The whole check-and-insert runs in one `BEGIN IMMEDIATE` transaction:
    /// SQLite hands out its write lock before the first read, so no other
    /// reservation can interleave between counting bookings and inserting.
    /// Every early return drops `tx`, which rolls it back.
    pub async fn reserve(&self, event_id: i64, user_id: &str) -> Result<Booking, ReservationError> {
        let mut tx = self.db.pool.begin_with("BEGIN IMMEDIATE").await?;

        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, total_seats FROM events WHERE id = ?"
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ReservationError::EventNotFound)?;

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT 1 FROM bookings WHERE event_id = ? AND user_id = ?"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
        if duplicate {
            debug!(event_id, user_id, "reservation rejected: already booked");
            return Err(ReservationError::AlreadyBooked);
        }

        let booked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;
        if booked >= event.total_seats {
            debug!(
                event_id,
                user_id,
                booked,
                total_seats = event.total_seats,
                "reservation rejected: sold out"
            );
            return Err(ReservationError::SoldOut);
        }

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let inserted = sqlx::query(
            "INSERT INTO bookings (event_id, user_id, created_at) VALUES (?, ?, ?)"
        )
        .bind(event_id)
        .bind(user_id)
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ReservationError::AlreadyBooked
            }
            other => ReservationError::Storage(other),
        })?;

        tx.commit().await?;

        let booking = Booking {
            id: inserted.last_insert_rowid(),
            event_id,
            user_id: user_id.to_string(),
            created_at,
        };
        info!(booking_id = booking.id, event_id, user_id, "seat reserved");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Database;

    async fn service_with_event(total_seats: i64) -> (tempfile::TempDir, BookingService, i64) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("reserve.db").display()),
            pool_size: 4,
            busy_timeout_secs: 5,
        };
        let db = Database::new(&config).await.unwrap();
        db.run_migrations().await.unwrap();
        let event_id = db.insert_event("Concert", total_seats).await.unwrap();
        (dir, BookingService::new(db), event_id)
    }

    #[tokio::test]
    async fn reserve_returns_created_booking() {
        let (_dir, service, event_id) = service_with_event(2).await;

        let booking = service.reserve(event_id, "u1").await.unwrap();

        assert_eq!(booking.event_id, event_id);
        assert_eq!(booking.user_id, "u1");
        assert!(booking.id > 0);
        assert!(booking.created_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&booking.created_at).is_ok());
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let (_dir, service, event_id) = service_with_event(2).await;

        let err = service.reserve(event_id + 100, "u1").await.unwrap_err();
        assert!(matches!(err, ReservationError::EventNotFound));
    }

    #[tokio::test]
    async fn duplicate_is_reported_before_sold_out() {
        let (_dir, service, event_id) = service_with_event(1).await;

        service.reserve(event_id, "u1").await.unwrap();

        // мест уже нет, но повторная бронь того же пользователя важнее
        let err = service.reserve(event_id, "u1").await.unwrap_err();
        assert!(matches!(err, ReservationError::AlreadyBooked));

        let err = service.reserve(event_id, "u2").await.unwrap_err();
        assert!(matches!(err, ReservationError::SoldOut));
    }

    #[tokio::test]
    async fn zero_capacity_event_is_sold_out() {
        let (_dir, service, event_id) = service_with_event(0).await;

        let err = service.reserve(event_id, "u1").await.unwrap_err();
        assert!(matches!(err, ReservationError::SoldOut));
    }

    #[tokio::test]
    async fn failed_reservation_leaves_no_row() {
        let (_dir, service, event_id) = service_with_event(1).await;

        service.reserve(event_id, "u1").await.unwrap();
        let _ = service.reserve(event_id, "u2").await;
        let _ = service.reserve(event_id, "u1").await;

        let events = service.list_events().await.unwrap();
        assert_eq!(events[0].seats_left, 0);
    }

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(ReservationError::EventNotFound.to_string(), "Event not found");
        assert_eq!(ReservationError::AlreadyBooked.to_string(), "User already booked this event");
        assert_eq!(ReservationError::SoldOut.to_string(), "Event is sold out");
    }
}
