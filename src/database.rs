use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

pub const DEFAULT_EVENT_NAME: &str = "Test Event";
pub const DEFAULT_EVENT_SEATS: i64 = 2;

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Sqlite>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed");
        Ok(())
    }

    /// Inserts the default event when the catalog is empty.
    /// Returns `true` if a row was written.
    pub async fn seed_default_event(&self) -> Result<bool, sqlx::Error> {
        let has_any_event = sqlx::query_scalar::<_, i64>("SELECT 1 FROM events LIMIT 1")
            .fetch_optional(&self.pool)
            .await?
            .is_some();

        if has_any_event {
            return Ok(false);
        }

        let id = self.insert_event(DEFAULT_EVENT_NAME, DEFAULT_EVENT_SEATS).await?;
        info!(event_id = id, "Seeded default event");
        Ok(true)
    }

    pub async fn insert_event(&self, name: &str, total_seats: i64) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO events (name, total_seats) VALUES (?, ?)")
            .bind(name)
            .bind(total_seats)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
